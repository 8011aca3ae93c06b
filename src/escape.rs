//! Escaping for the three sinks transcript text lands in: HTML body text,
//! HTML attribute values, and script string literals.
//!
//! Body and attribute sinks share [`escape_html`]. Script literals get a
//! JSON encoder instead of entity escaping, so escaped entities are never
//! re-interpreted as literal characters inside a script context.

/// Escape `& < > " '` for embedding in HTML body text or a double-quoted
/// attribute value. Applied exactly once, at render time.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

/// Inverse of [`escape_html`]. `&amp;` is decoded last so escaped input
/// round-trips exactly.
pub fn unescape_html(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

/// Encode a string as a JavaScript string literal (quotes included).
/// JSON is a subset of JS literal syntax, so this is injection-safe for
/// interpolation into a `<script>` block.
pub fn js_string_literal(s: &str) -> String {
    // Serializing a &str cannot fail.
    let json = serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string());
    // JSON leaves `<` alone, so `</script>` inside the literal would still
    // close the surrounding block. `<` is equivalent inside a literal.
    json.replace('<', "\\u003c")
}
