//! Transcript fetching.
//!
//! The production source reads the watch page's `ytInitialPlayerResponse`,
//! picks a caption track, and downloads it in `json3` form. Every failure
//! mode — no captions, unavailable video, network error, malformed payload —
//! collapses into [`AppError::TranscriptUnavailable`] with a readable
//! message; there are no retries.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::AppError;
use crate::util::VideoId;

/// One timed unit of transcript text. Upstream timing fields exist in the
/// payload but nothing downstream uses them.
#[derive(Debug, Clone)]
pub struct TranscriptSegment {
    pub text: String,
}

#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch(&self, id: &VideoId) -> Result<Vec<TranscriptSegment>, AppError>;
}

// Without a browser-looking user agent YouTube serves a consent page with no
// player response in it.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

static PLAYER_RESPONSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"var ytInitialPlayerResponse\s*=\s*(\{.*?\});").unwrap());

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    captions: Option<Captions>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    caption_tracks: Option<Vec<CaptionTrack>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: Option<String>,
}

#[derive(Deserialize)]
struct Json3Transcript {
    events: Option<Vec<Json3Event>>,
}

#[derive(Deserialize)]
struct Json3Event {
    segs: Option<Vec<Json3Seg>>,
}

#[derive(Deserialize)]
struct Json3Seg {
    utf8: Option<String>,
}

/// Fetches transcripts straight from YouTube.
pub struct YoutubeTranscripts {
    client: reqwest::Client,
    languages: Vec<String>,
}

impl YoutubeTranscripts {
    pub fn new(languages: Vec<String>) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, languages })
    }

    async fn fetch_inner(&self, id: &VideoId) -> Result<Vec<TranscriptSegment>, String> {
        let watch_url = format!("https://www.youtube.com/watch?v={}", id);
        let html = self
            .client
            .get(&watch_url)
            .send()
            .await
            .map_err(|e| format!("could not reach YouTube: {}", e))?
            .error_for_status()
            .map_err(|e| format!("YouTube rejected the request: {}", e))?
            .text()
            .await
            .map_err(|e| format!("could not read the watch page: {}", e))?;

        let player: PlayerResponse = PLAYER_RESPONSE_RE
            .captures(&html)
            .and_then(|c| serde_json::from_str(&c[1]).ok())
            .ok_or_else(|| {
                "no player data found (the video may be private or unavailable)".to_string()
            })?;

        let tracks = player
            .captions
            .and_then(|c| c.player_captions_tracklist_renderer)
            .and_then(|r| r.caption_tracks)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| "subtitles are disabled for this video".to_string())?;

        let track = pick_track(&tracks, &self.languages);

        let transcript_url = format!("{}&fmt=json3", track.base_url);
        let payload: Json3Transcript = self
            .client
            .get(&transcript_url)
            .send()
            .await
            .map_err(|e| format!("could not download captions: {}", e))?
            .error_for_status()
            .map_err(|e| format!("caption download failed: {}", e))?
            .json()
            .await
            .map_err(|e| format!("could not parse captions: {}", e))?;

        let segments = events_to_segments(payload);
        if segments.is_empty() {
            return Err("the caption track is empty".to_string());
        }
        Ok(segments)
    }
}

/// Prefer a track whose language code matches one of the configured
/// languages (prefix match, so `en` also takes `en-US`); otherwise take the
/// first track YouTube lists.
fn pick_track<'a>(tracks: &'a [CaptionTrack], languages: &[String]) -> &'a CaptionTrack {
    for lang in languages {
        if let Some(track) = tracks.iter().find(|t| {
            t.language_code
                .as_deref()
                .map(|c| c == lang || c.starts_with(&format!("{}-", lang)))
                .unwrap_or(false)
        }) {
            return track;
        }
    }
    &tracks[0]
}

fn events_to_segments(payload: Json3Transcript) -> Vec<TranscriptSegment> {
    payload
        .events
        .unwrap_or_default()
        .into_iter()
        .filter_map(|event| {
            let text: String = event
                .segs?
                .into_iter()
                .filter_map(|s| s.utf8)
                .collect::<String>()
                // Inline breaks inside one event are display hints, not
                // segment boundaries.
                .replace('\n', " ")
                .trim()
                .to_string();
            if text.is_empty() {
                None
            } else {
                Some(TranscriptSegment { text })
            }
        })
        .collect()
}

#[async_trait]
impl TranscriptSource for YoutubeTranscripts {
    async fn fetch(&self, id: &VideoId) -> Result<Vec<TranscriptSegment>, AppError> {
        eprintln!("[TRANSCRIPT] Fetching captions for {}", id);
        self.fetch_inner(id)
            .await
            .map_err(AppError::TranscriptUnavailable)
    }
}
