use actix_web::{http::header, web, HttpResponse, Responder};
use serde::Deserialize;
use url::form_urlencoded;

use crate::error::AppError;
use crate::escape::{escape_html, js_string_literal};
use crate::pdf;
use crate::render::{self, TranscriptDocument};
use crate::state::AppState;
use crate::title::FALLBACK_TITLE;
use crate::util::{extract_video_id, sanitize_filename};

#[derive(Deserialize)]
pub struct IndexQuery {
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct TranscriptRequest {
    pub youtube_url: String,
}

#[derive(Deserialize)]
pub struct DownloadRequest {
    pub content: String,
    pub title: Option<String>,
}

pub async fn index(query: web::Query<IndexQuery>) -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(form_page(query.error.as_deref()))
}

pub async fn get_transcript(
    form: web::Form<TranscriptRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    let id = match extract_video_id(&form.youtube_url) {
        Some(id) => id,
        None => {
            eprintln!("[TRANSCRIPT] No video ID in: {}", form.youtube_url);
            return redirect_with_error(&AppError::InvalidUrl);
        }
    };

    let segments = match state.transcripts.fetch(&id).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[TRANSCRIPT] Fetch failed for {}: {}", id, e);
            return redirect_with_error(&e);
        }
    };

    // Best effort; a missing title never blocks the transcript.
    let title = state.titles.resolve(&id).await;

    let doc = render::render(&segments);
    eprintln!(
        "[TRANSCRIPT] Delivered {} segment(s) for {}",
        segments.len(),
        id
    );
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(transcript_page(&doc, &title))
}

pub async fn download_pdf(form: web::Form<DownloadRequest>) -> impl Responder {
    let title = form
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(FALLBACK_TITLE)
        .to_string();
    let filename = sanitize_filename(&title);

    match pdf::export(&form.content, &filename) {
        Ok(pdf) => {
            eprintln!(
                "[PDF] Exported \"{}\": {} page(s), {} bytes",
                filename,
                pdf.pages,
                pdf.bytes.len()
            );
            HttpResponse::Ok()
                .content_type("application/pdf")
                .append_header((
                    header::CONTENT_DISPOSITION,
                    // The sanitizer already stripped quote characters.
                    format!(r#"attachment; filename="{}.pdf""#, filename),
                ))
                .append_header((header::CACHE_CONTROL, "no-store"))
                .body(pdf.bytes)
        }
        Err(e) => {
            eprintln!("[PDF] Export failed: {:#}", e);
            HttpResponse::InternalServerError()
                .content_type("text/html; charset=utf-8")
                .body(format!(
                    "<h2>Error: {}</h2>",
                    escape_html(&format!("{:#}", e))
                ))
        }
    }
}

/// Failures surface as a redirect back to the form with an inline message.
fn redirect_with_error(err: &AppError) -> HttpResponse {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("error", &err.to_string())
        .finish();
    HttpResponse::SeeOther()
        .append_header((header::LOCATION, format!("/?{}", query)))
        .finish()
}

fn form_page(error: Option<&str>) -> String {
    let error_block = match error {
        Some(msg) => format!(
            r#"<p class="error">{}</p>"#,
            escape_html(msg)
        ),
        None => String::new(),
    };
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>YouTube Transcript Extractor</title>
    <style>
        body {{ font-family: Arial, sans-serif; padding: 20px; background: #f9f9f9; }}
        h1 {{ color: #333; }}
        input[type=text] {{ width: 80%; padding: 10px; font-size: 16px; }}
        button {{ padding: 10px 20px; font-size: 16px; margin-top: 10px; }}
        .error {{ color: #b00020; }}
    </style>
</head>
<body>
    <h1>YouTube Transcript Extractor</h1>
    {error_block}
    <form action="/get-transcript" method="post">
        <input type="text" name="youtube_url" placeholder="https://www.youtube.com/watch?v=..." required>
        <br>
        <button type="submit">Get Transcript</button>
    </form>
</body>
</html>"#
    )
}

fn transcript_page(doc: &TranscriptDocument, title: &str) -> String {
    let escaped_title = escape_html(title);
    // Script sink gets a JSON literal, never entity-escaped text.
    let title_literal = js_string_literal(title);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Transcript</title>
    <style>
        body {{ font-family: Arial, sans-serif; padding: 20px; background: #f9f9f9; }}
        .transcript {{ white-space: pre-wrap; background: #fff; padding: 20px; border-radius: 5px; margin-top: 20px; box-shadow: 0 0 10px rgba(0,0,0,0.1); }}
        button {{ padding: 10px 20px; font-size: 16px; margin-top: 10px; }}
    </style>
</head>
<body>
    <h1>Transcript</h1>
    <form action="/download-pdf" method="post">
        <input type="hidden" name="content" value="{content}">
        <input type="hidden" name="title" value="{escaped_title}">
        <button type="submit">Download as PDF</button>
    </form>
    <div class="transcript">{content}</div>
    <script>
        document.title = {title_literal};
    </script>
</body>
</html>"#,
        content = doc.escaped,
    )
}
