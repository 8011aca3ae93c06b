//! End-to-end handler tests with stubbed upstream sources.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App, Error};
use async_trait::async_trait;

use yt_transcript_service::error::AppError;
use yt_transcript_service::handlers;
use yt_transcript_service::state::AppState;
use yt_transcript_service::title::TitleSource;
use yt_transcript_service::transcript::{TranscriptSegment, TranscriptSource};
use yt_transcript_service::util::VideoId;

struct StubTranscripts {
    outcome: Result<Vec<&'static str>, &'static str>,
    calls: AtomicUsize,
}

impl StubTranscripts {
    fn returning(lines: Vec<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(lines),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(message: &'static str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(message),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl TranscriptSource for StubTranscripts {
    async fn fetch(&self, _id: &VideoId) -> Result<Vec<TranscriptSegment>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(lines) => Ok(lines
                .iter()
                .map(|l| TranscriptSegment {
                    text: l.to_string(),
                })
                .collect()),
            Err(msg) => Err(AppError::TranscriptUnavailable(msg.to_string())),
        }
    }
}

struct FixedTitle(&'static str);

#[async_trait]
impl TitleSource for FixedTitle {
    async fn resolve(&self, _id: &VideoId) -> String {
        self.0.to_string()
    }
}

async fn service(
    transcripts: Arc<dyn TranscriptSource>,
    title: &'static str,
) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = Error>
{
    let state = web::Data::new(AppState {
        transcripts,
        titles: Arc::new(FixedTitle(title)),
    });
    test::init_service(
        App::new()
            .app_data(state)
            .app_data(web::FormConfig::default().limit(10 * 1024 * 1024))
            .service(web::resource("/").route(web::get().to(handlers::index)))
            .service(
                web::resource("/get-transcript").route(web::post().to(handlers::get_transcript)),
            )
            .service(web::resource("/download-pdf").route(web::post().to(handlers::download_pdf))),
    )
    .await
}

#[actix_web::test]
async fn index_renders_the_form() {
    let app = service(StubTranscripts::returning(vec![]), "t").await;
    let req = test::TestRequest::get().uri("/").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let page = String::from_utf8(body.to_vec()).unwrap();
    assert!(page.contains("YouTube Transcript Extractor"));
    assert!(page.contains(r#"name="youtube_url""#));
}

#[actix_web::test]
async fn index_escapes_the_error_query_parameter() {
    let app = service(StubTranscripts::returning(vec![]), "t").await;
    let req = test::TestRequest::get()
        .uri("/?error=%3Cscript%3Ealert(1)%3C%2Fscript%3E")
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let page = String::from_utf8(body.to_vec()).unwrap();
    assert!(!page.contains("<script>alert"));
    assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[actix_web::test]
async fn valid_url_returns_the_rendered_transcript() {
    let stub = StubTranscripts::returning(vec!["line one", "line two"]);
    let app = service(stub.clone(), "My Video: Part 1").await;

    let req = test::TestRequest::post()
        .uri("/get-transcript")
        .set_form([(
            "youtube_url",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=5s",
        )])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let page = String::from_utf8(body.to_vec()).unwrap();
    assert!(page.contains("line one\nline two"));
    // The export trigger carries the transcript and title back later.
    assert!(page.contains(r#"action="/download-pdf""#));
    assert!(page.contains(r#"name="title" value="My Video: Part 1""#));
    assert!(page.contains(r#"document.title = "My Video: Part 1";"#));
    assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
}

#[actix_web::test]
async fn invalid_url_redirects_without_calling_the_fetcher() {
    let stub = StubTranscripts::returning(vec!["unused"]);
    let app = service(stub.clone(), "t").await;

    let req = test::TestRequest::post()
        .uri("/get-transcript")
        .set_form([("youtube_url", "not a url")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let location = resp
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(location.starts_with("/?error="));
    assert!(location.contains("Invalid+YouTube+URL"));
    assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn fetch_failure_redirects_with_the_message() {
    let app = service(StubTranscripts::failing("subtitles are disabled"), "t").await;

    let req = test::TestRequest::post()
        .uri("/get-transcript")
        .set_form([(
            "youtube_url",
            "https://youtu.be/dQw4w9WgXcQ",
        )])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let location = resp
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(location.contains("subtitles+are+disabled"));
}

#[actix_web::test]
async fn download_returns_a_pdf_attachment_with_a_sanitized_name() {
    let app = service(StubTranscripts::returning(vec![]), "t").await;

    let req = test::TestRequest::post()
        .uri("/download-pdf")
        .set_form([
            ("content", "line one\nline two"),
            ("title", "My Video: Part 1"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    assert_eq!(
        resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        r#"attachment; filename="My Video_ Part 1.pdf""#
    );

    let body = test::read_body(resp).await;
    assert!(body.starts_with(b"%PDF"));
}

#[actix_web::test]
async fn download_without_a_title_falls_back_to_transcript() {
    let app = service(StubTranscripts::returning(vec![]), "t").await;

    let req = test::TestRequest::post()
        .uri("/download-pdf")
        .set_form([("content", "")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        r#"attachment; filename="transcript.pdf""#
    );

    // Empty content still exports a valid (blank) document.
    let body = test::read_body(resp).await;
    assert!(body.starts_with(b"%PDF"));
}
