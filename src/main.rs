use std::sync::Arc;

use actix_web::{web, App, HttpServer};

use yt_transcript_service::config::AppConfig;
use yt_transcript_service::handlers;
use yt_transcript_service::state::AppState;
use yt_transcript_service::title::YoutubeTitles;
use yt_transcript_service::transcript::YoutubeTranscripts;

// Transcripts round-trip through the export form, so the urlencoded body
// limit has to be well above the actix default.
const FORM_PAYLOAD_LIMIT: usize = 10 * 1024 * 1024;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cfg_path = std::env::args()
        .skip_while(|a| a != "--config")
        .skip(1)
        .next()
        .unwrap_or_else(|| "config.toml".to_string());

    let cfg = match AppConfig::load(&cfg_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[CONFIG] Failed to load {}: {:#}", cfg_path, e);
            std::process::exit(1);
        }
    };

    println!("========================================");
    println!("  YouTube Transcript Service");
    println!("  http://{}", cfg.listen_addr);
    println!("========================================");
    println!();

    let transcripts = match YoutubeTranscripts::new(cfg.transcript_languages.clone()) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("[STARTUP] Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let state = web::Data::new(AppState {
        transcripts: Arc::new(transcripts),
        titles: Arc::new(YoutubeTitles::new()),
    });

    let bind_addr = cfg.listen_addr.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(state.clone())
            .app_data(web::FormConfig::default().limit(FORM_PAYLOAD_LIMIT))
            .service(web::resource("/").route(web::get().to(handlers::index)))
            .service(
                web::resource("/get-transcript").route(web::post().to(handlers::get_transcript)),
            )
            .service(web::resource("/download-pdf").route(web::post().to(handlers::download_pdf)))
    })
    .bind(bind_addr.as_str())?
    .run()
    .await
}
