//! Best-effort video title lookup via YouTube's oEmbed endpoint.
//!
//! Asymmetric to transcript fetching on purpose: a missing title must never
//! block transcript delivery, so `resolve` is infallible and degrades to a
//! fixed fallback on any error, timeout, or empty response.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::util::VideoId;

pub const FALLBACK_TITLE: &str = "transcript";

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

#[async_trait]
pub trait TitleSource: Send + Sync {
    /// Always returns a non-empty string.
    async fn resolve(&self, id: &VideoId) -> String;
}

#[derive(Deserialize)]
struct OembedResponse {
    title: String,
}

pub struct YoutubeTitles {
    client: reqwest::Client,
    endpoint: String,
}

impl YoutubeTitles {
    pub fn new() -> Self {
        Self::with_endpoint("https://www.youtube.com/oembed")
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    async fn lookup(&self, id: &VideoId) -> Result<String, reqwest::Error> {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("url", &format!("https://www.youtube.com/watch?v={}", id))
            .append_pair("format", "json")
            .finish();
        let url = format!("{}?{}", self.endpoint, query);
        let resp: OembedResponse = self
            .client
            .get(&url)
            .timeout(LOOKUP_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp.title)
    }
}

#[async_trait]
impl TitleSource for YoutubeTitles {
    async fn resolve(&self, id: &VideoId) -> String {
        match self.lookup(id).await {
            Ok(title) if !title.trim().is_empty() => title,
            Ok(_) => FALLBACK_TITLE.to_string(),
            Err(e) => {
                eprintln!("[TITLE] Lookup failed for {}: {}", id, e);
                FALLBACK_TITLE.to_string()
            }
        }
    }
}
