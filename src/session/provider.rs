use super::config::StartSessionRequest;
use super::token::SessionToken;
use anyhow::Result;
use tokio::sync::mpsc;

/// Event pushed by the realtime provider while a session is live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RealtimeEvent {
    /// Incremental speech-to-text result
    TranscriptChunk { message: String },

    /// The provider ended the session
    Disconnected { reason: String },
}

/// Factory for realtime sessions
///
/// Implementations:
/// - Hosted streaming-avatar service (out of tree)
/// - Scripted: replays transcript lines from a file (demos/testing)
#[async_trait::async_trait]
pub trait RealtimeProvider: Send + Sync {
    /// Construct a session authorized by `token`
    ///
    /// Returns the session and the receiver for its pushed events. The
    /// sender side belongs to the provider; events arrive in order.
    async fn create_session(
        &self,
        token: SessionToken,
    ) -> Result<(Box<dyn RealtimeSession>, mpsc::Receiver<RealtimeEvent>)>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// A live realtime session handle
#[async_trait::async_trait]
pub trait RealtimeSession: Send + Sync {
    /// Start the avatar/session context
    async fn start(&mut self, request: &StartSessionRequest) -> Result<()>;

    /// Activate microphone capture
    async fn start_voice_chat(&mut self) -> Result<()>;

    /// Deactivate microphone capture
    fn close_voice_chat(&mut self);

    /// End the session context
    async fn stop(&mut self) -> Result<()>;
}
