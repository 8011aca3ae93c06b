//! A small web service: paste a YouTube URL, read the video's transcript,
//! download it as a PDF.

pub mod config;
pub mod error;
pub mod escape;
pub mod handlers;
pub mod pdf;
pub mod render;
pub mod state;
pub mod title;
pub mod transcript;
pub mod util;
