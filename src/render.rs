use crate::escape::escape_html;
use crate::transcript::TranscriptSegment;

/// A transcript ready for embedding: the plain newline-joined text plus its
/// HTML-escaped form. Escaping happens exactly once, here.
#[derive(Debug, Clone)]
pub struct TranscriptDocument {
    pub text: String,
    pub escaped: String,
}

/// Join segment texts in the order received with single newlines. No
/// reordering, no deduplication, no trimming beyond what the source carries.
pub fn render(segments: &[TranscriptSegment]) -> TranscriptDocument {
    let text = segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let escaped = escape_html(&text);
    TranscriptDocument { text, escaped }
}
