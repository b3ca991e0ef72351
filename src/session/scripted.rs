use super::config::StartSessionRequest;
use super::provider::{RealtimeEvent, RealtimeProvider, RealtimeSession};
use super::token::SessionToken;
use anyhow::{bail, Context, Result};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

/// Realtime provider that replays transcript lines instead of capturing audio
///
/// Each non-empty line becomes one transcription chunk, pushed at a fixed
/// interval once the microphone is activated.
#[derive(Debug, Clone)]
pub struct ScriptedProvider {
    lines: Vec<String>,
    interval: Duration,
    disconnect_at_end: bool,
}

impl ScriptedProvider {
    pub fn new(lines: Vec<String>, interval: Duration) -> Self {
        Self {
            lines,
            interval,
            disconnect_at_end: false,
        }
    }

    /// Load lines from a text file
    pub fn from_file<P: AsRef<Path>>(path: P, interval: Duration) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;

        let lines = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();

        Ok(Self::new(lines, interval))
    }

    /// Push a disconnect event after the last line
    pub fn with_disconnect_at_end(mut self, disconnect: bool) -> Self {
        self.disconnect_at_end = disconnect;
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

#[async_trait::async_trait]
impl RealtimeProvider for ScriptedProvider {
    async fn create_session(
        &self,
        token: SessionToken,
    ) -> Result<(Box<dyn RealtimeSession>, mpsc::Receiver<RealtimeEvent>)> {
        if token.as_str().is_empty() {
            bail!("Session token is empty");
        }

        let (events_tx, events_rx) = mpsc::channel(64);
        let session = ScriptedSession {
            lines: self.lines.clone(),
            interval: self.interval,
            disconnect_at_end: self.disconnect_at_end,
            events: Some(events_tx),
            started: false,
            feeder: None,
        };

        Ok((Box::new(session), events_rx))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

struct ScriptedSession {
    lines: Vec<String>,
    interval: Duration,
    disconnect_at_end: bool,
    events: Option<mpsc::Sender<RealtimeEvent>>,
    started: bool,
    feeder: Option<JoinHandle<()>>,
}

#[async_trait::async_trait]
impl RealtimeSession for ScriptedSession {
    async fn start(&mut self, request: &StartSessionRequest) -> Result<()> {
        info!(
            "Scripted session started (avatar={}, stt={}, language={})",
            request.avatar_name,
            request.stt_settings.provider.as_str(),
            request.stt_settings.language
        );
        self.started = true;
        Ok(())
    }

    async fn start_voice_chat(&mut self) -> Result<()> {
        if !self.started {
            bail!("Session not started");
        }
        if self.feeder.is_some() {
            return Ok(());
        }
        let Some(events) = self.events.clone() else {
            bail!("Session already ended");
        };

        let lines = self.lines.clone();
        let interval = self.interval;
        let disconnect_at_end = self.disconnect_at_end;

        self.feeder = Some(tokio::spawn(async move {
            for line in lines {
                tokio::time::sleep(interval).await;
                let chunk = RealtimeEvent::TranscriptChunk { message: line };
                if events.send(chunk).await.is_err() {
                    return;
                }
            }

            if disconnect_at_end {
                let _ = events
                    .send(RealtimeEvent::Disconnected {
                        reason: "script finished".to_string(),
                    })
                    .await;
            }
        }));

        Ok(())
    }

    fn close_voice_chat(&mut self) {
        if let Some(feeder) = self.feeder.take() {
            feeder.abort();
        }
    }

    async fn stop(&mut self) -> Result<()> {
        self.close_voice_chat();
        self.events = None;
        self.started = false;
        info!("Scripted session ended");
        Ok(())
    }
}
