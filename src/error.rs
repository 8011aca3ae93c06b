use thiserror::Error;

/// User-facing failures. Everything here ends up HTML-escaped in an inline
/// message on the form page; nothing is fatal to the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid YouTube URL")]
    InvalidUrl,

    /// Collapsed bucket for every way a transcript fetch can fail: disabled
    /// captions, private/unavailable video, network error, malformed payload.
    #[error("Could not retrieve transcript: {0}")]
    TranscriptUnavailable(String),
}
