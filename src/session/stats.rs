use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Statistics about a session client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionStats {
    /// Whether a session is currently listening
    pub is_listening: bool,

    /// ID of the current (or most recent) session
    pub session_id: Option<Uuid>,

    /// When the current (or most recent) session started listening
    pub started_at: Option<DateTime<Utc>>,

    /// Transcription chunks received in the current (or most recent) session
    pub chunks_received: usize,

    /// Sessions that reached the listening state over the client's lifetime
    pub sessions_started: usize,
}
