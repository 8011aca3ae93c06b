use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: String,
    /// Preferred caption languages, in order. `en` also matches `en-US`.
    pub transcript_languages: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AppConfigFile {
    listen_addr: Option<String>,
    transcript_languages: Option<Vec<String>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            transcript_languages: vec!["en".to_string()],
        }
    }
}

impl AppConfig {
    /// Load from a TOML file, falling back to defaults per field. A missing
    /// file is not an error — the service needs no configuration to run.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path).with_context(|| {
            format!(
                "Failed to read config file: {}",
                path.to_string_lossy().as_ref()
            )
        })?;
        let file: AppConfigFile = toml::from_str(&raw).context("Failed to parse config.toml")?;

        let defaults = Self::default();
        Ok(Self {
            listen_addr: file.listen_addr.unwrap_or(defaults.listen_addr),
            transcript_languages: file
                .transcript_languages
                .map(|langs| {
                    langs
                        .into_iter()
                        .map(|l| l.trim().to_string())
                        .filter(|l| !l.is_empty())
                        .collect()
                })
                .filter(|langs: &Vec<String>| !langs.is_empty())
                .unwrap_or(defaults.transcript_languages),
        })
    }
}
