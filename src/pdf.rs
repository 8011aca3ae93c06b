//! Plain-text PDF export.
//!
//! A4 pages, 15 mm margins, one 10 mm row per wrapped line, 12 pt built-in
//! Helvetica. When a row would cross the bottom margin a new page starts.
//! The built-in font only covers Latin-1; characters outside it are rendered
//! as `?`.

use anyhow::{Context, Result};
use printpdf::{BuiltinFont, Mm, PdfDocument};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const LINE_HEIGHT_MM: f32 = 10.0;
const FONT_SIZE_PT: f32 = 12.0;

// Usable width is 180 mm; a 12 pt Helvetica glyph averages a touch over
// 2 mm, so wrap conservatively.
const WRAP_COLUMNS: usize = 85;

/// A finished export: the raw bytes plus the page count, tracked during
/// layout so nobody has to parse the byte stream to know it.
pub struct PdfExport {
    pub bytes: Vec<u8>,
    pub pages: usize,
}

/// Render `text` into a paginated PDF. Empty input still produces a valid
/// single blank page.
pub fn export(text: &str, title: &str) -> Result<PdfExport> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .context("Failed to load built-in PDF font")?;

    let rows_per_page =
        ((PAGE_HEIGHT_MM - 2.0 * MARGIN_MM) / LINE_HEIGHT_MM) as usize;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut pages = 1;
    let mut row = 0usize;

    for line in text.split('\n') {
        for chunk in wrap_line(line, WRAP_COLUMNS) {
            if row == rows_per_page {
                let (page, layer_idx) =
                    doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
                layer = doc.get_page(page).get_layer(layer_idx);
                pages += 1;
                row = 0;
            }
            let y = PAGE_HEIGHT_MM - MARGIN_MM - (row as f32 + 1.0) * LINE_HEIGHT_MM;
            if !chunk.is_empty() {
                layer.use_text(to_latin1(&chunk), FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), &font);
            }
            row += 1;
        }
    }

    let bytes = doc
        .save_to_bytes()
        .context("Failed to serialize PDF")?;
    Ok(PdfExport { bytes, pages })
}

/// Word-wrap one input line into rows of at most `columns` characters.
/// Words longer than a full row are split hard. An empty line still yields
/// one (blank) row so vertical spacing survives.
fn wrap_line(line: &str, columns: usize) -> Vec<String> {
    if line.chars().count() <= columns {
        return vec![line.to_string()];
    }

    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in line.split(' ') {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > columns {
            rows.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if word_len > columns {
            // No break point inside the word; split it hard.
            let mut rest: Vec<char> = word.chars().collect();
            while !rest.is_empty() {
                let space = columns - if current_len > 0 { current_len + 1 } else { 0 };
                if space == 0 {
                    rows.push(std::mem::take(&mut current));
                    current_len = 0;
                    continue;
                }
                let take = space.min(rest.len());
                if current_len > 0 {
                    current.push(' ');
                    current_len += 1;
                }
                current.extend(rest.drain(..take));
                current_len += take;
                if current_len == columns {
                    rows.push(std::mem::take(&mut current));
                    current_len = 0;
                }
            }
        } else {
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}

/// The built-in fonts stop at Latin-1. Anything above U+00FF becomes `?`
/// rather than disappearing silently.
fn to_latin1(s: &str) -> String {
    s.chars()
        .map(|c| if (c as u32) <= 0xFF { c } else { '?' })
        .collect()
}
