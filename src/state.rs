use std::sync::Arc;

use crate::title::TitleSource;
use crate::transcript::TranscriptSource;

/// Shared per-process state: the two upstream boundaries, immutable after
/// startup, so handlers need no locking. Config is consumed at startup and
/// not carried here.
pub struct AppState {
    pub transcripts: Arc<dyn TranscriptSource>,
    pub titles: Arc<dyn TitleSource>,
}
