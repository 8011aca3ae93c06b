use once_cell::sync::Lazy;
use regex::Regex;

/// A validated 11-character YouTube video identifier.
///
/// Only constructed by [`extract_video_id`], so holding one means the
/// charset/length invariant already holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// Marker followed by exactly 11 ID-class characters. The capture stops at 11
// even when more ID-class characters follow; `&t=5s`-style tails are ignored.
static VIDEO_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:v=|embed/|be/|/)([0-9A-Za-z_-]{11})").unwrap());

/// Pull a video ID out of a raw URL string. The input is not required to be
/// a well-formed URL; first match wins. Absence is `None`, not an error —
/// the caller maps it to a validation message.
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    VIDEO_ID_RE.captures(url).map(|c| VideoId(c[1].to_string()))
}

/// Replace filesystem-reserved characters so the string is safe as a
/// download filename.
pub fn sanitize_filename(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\\' | '/' | '*' | '?' | ':' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}
