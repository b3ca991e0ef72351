use super::config::StartSessionRequest;
use super::error::SessionError;
use super::provider::{RealtimeEvent, RealtimeProvider, RealtimeSession};
use super::stats::SessionStats;
use super::token::TokenSource;
use super::transcript::Transcript;
use crate::ui::SessionView;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// A session that reached the listening state
struct ActiveSession {
    id: Uuid,
    session: Box<dyn RealtimeSession>,
    events: mpsc::Receiver<RealtimeEvent>,
}

/// Result of a [`PendingStart`], applied with [`SessionClient::finish_start`]
pub struct StartOutcome(Result<ActiveSession, SessionError>);

/// In-flight token fetch and session setup
pub struct PendingStart {
    future: Pin<Box<dyn Future<Output = Result<ActiveSession, SessionError>> + Send>>,
}

impl Future for PendingStart {
    type Output = StartOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.future.as_mut().poll(cx).map(StartOutcome)
    }
}

enum SessionState {
    Idle,
    Listening(ActiveSession),
}

/// Speech-to-text session client
///
/// Owns at most one realtime session. All operations take `&mut self`, so
/// they run one at a time on whichever task owns the client (normally the
/// [`SessionDriver`](super::SessionDriver)).
pub struct SessionClient {
    tokens: Arc<dyn TokenSource>,
    provider: Arc<dyn RealtimeProvider>,
    request: StartSessionRequest,
    state: SessionState,
    transcript: Transcript,
    error: Option<SessionError>,
    last_session_id: Option<Uuid>,
    started_at: Option<DateTime<Utc>>,
    chunks_received: usize,
    sessions_started: usize,
}

impl SessionClient {
    pub fn new(
        tokens: Arc<dyn TokenSource>,
        provider: Arc<dyn RealtimeProvider>,
        request: StartSessionRequest,
    ) -> Self {
        Self {
            tokens,
            provider,
            request,
            state: SessionState::Idle,
            transcript: Transcript::default(),
            error: None,
            last_session_id: None,
            started_at: None,
            chunks_received: 0,
            sessions_started: 0,
        }
    }

    pub fn is_listening(&self) -> bool {
        matches!(self.state, SessionState::Listening(_))
    }

    pub fn transcript(&self) -> &str {
        self.transcript.as_str()
    }

    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    /// Start a session. No-op while one is already active.
    ///
    /// Failures never escape; they land in [`SessionClient::error`].
    pub async fn start(&mut self) {
        if let Some(pending) = self.begin_start() {
            let outcome = pending.await;
            self.finish_start(outcome);
        }
    }

    /// Guard and clear for a new session
    ///
    /// Returns `None` while a session is active. Otherwise the error and
    /// transcript are cleared immediately and the returned future performs
    /// the token fetch and session setup without borrowing the client.
    /// Dropping it abandons the attempt; the client stays idle.
    pub fn begin_start(&mut self) -> Option<PendingStart> {
        if self.is_listening() {
            info!("Session is already active");
            return None;
        }

        self.error = None;
        self.transcript.clear();

        let future = Self::open(
            Arc::clone(&self.tokens),
            Arc::clone(&self.provider),
            self.request.clone(),
        );
        Some(PendingStart {
            future: Box::pin(future),
        })
    }

    /// Apply the result of a [`PendingStart`]
    pub fn finish_start(&mut self, outcome: StartOutcome) {
        if self.is_listening() {
            warn!("Discarding start result, a session is already active");
            return;
        }

        match outcome.0 {
            Ok(active) => {
                info!(session_id = %active.id, "STT session started, listening for speech");
                self.last_session_id = Some(active.id);
                self.started_at = Some(Utc::now());
                self.chunks_received = 0;
                self.sessions_started += 1;
                self.state = SessionState::Listening(active);
            }
            Err(e) => {
                error!("Error starting STT session: {}", e);
                self.error = Some(e);
            }
        }
    }

    async fn open(
        tokens: Arc<dyn TokenSource>,
        provider: Arc<dyn RealtimeProvider>,
        request: StartSessionRequest,
    ) -> Result<ActiveSession, SessionError> {
        let token = tokens.fetch_token().await?;

        info!("Opening {} session", provider.name());
        let (mut session, events) = provider
            .create_session(token)
            .await
            .map_err(|e| SessionError::SessionStart(e.to_string()))?;

        // On any error below `session` is dropped, never stored
        session
            .start(&request)
            .await
            .map_err(|e| SessionError::SessionStart(e.to_string()))?;
        session
            .start_voice_chat()
            .await
            .map_err(|e| SessionError::SessionStart(e.to_string()))?;

        Ok(ActiveSession {
            id: Uuid::new_v4(),
            session,
            events,
        })
    }

    /// Stop the active session. No-op while idle.
    pub async fn stop(&mut self) {
        if let Err(e) = self.teardown().await {
            error!("Error stopping STT session: {}", e);
            self.error = Some(e);
        }
    }

    /// Release the session handle. Returns false if there was none.
    ///
    /// The state is swapped to `Idle` before any provider call, so a second
    /// teardown (stop racing a disconnect) finds nothing to release.
    async fn teardown(&mut self) -> Result<bool, SessionError> {
        let active = match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Listening(active) => active,
            SessionState::Idle => return Ok(false),
        };

        let ActiveSession {
            id, mut session, ..
        } = active;

        session.close_voice_chat();
        session
            .stop()
            .await
            .map_err(|e| SessionError::SessionStop(e.to_string()))?;

        info!(session_id = %id, "STT session stopped");
        Ok(true)
    }

    /// Wait for the next event of the active session
    ///
    /// Pending forever while idle, so it can sit in a `select!` next to the
    /// command channel. A closed event channel reads as a disconnect.
    pub async fn next_event(&mut self) -> RealtimeEvent {
        match &mut self.state {
            SessionState::Listening(active) => match active.events.recv().await {
                Some(event) => event,
                None => RealtimeEvent::Disconnected {
                    reason: "event stream closed".to_string(),
                },
            },
            SessionState::Idle => std::future::pending().await,
        }
    }

    /// Apply an event from the active session. Ignored while idle.
    pub async fn handle_event(&mut self, event: RealtimeEvent) {
        if !self.is_listening() {
            return;
        }

        match event {
            RealtimeEvent::TranscriptChunk { message } => {
                self.transcript.append(&message);
                self.chunks_received += 1;
            }
            RealtimeEvent::Disconnected { reason } => {
                warn!("Stream disconnected: {}", reason);
                self.stop().await;
                self.error = Some(SessionError::Disconnected);
            }
        }
    }

    /// Snapshot for the UI
    pub fn view(&self) -> SessionView {
        SessionView {
            listening: self.is_listening(),
            error: self.error.as_ref().map(|e| e.to_string()),
            transcript: self.transcript.as_str().to_string(),
        }
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            is_listening: self.is_listening(),
            session_id: self.last_session_id,
            started_at: self.started_at,
            chunks_received: self.chunks_received,
            sessions_started: self.sessions_started,
        }
    }
}
