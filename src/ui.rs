//! Console rendering of the session state

use serde::Serialize;
use std::fmt;

/// What the UI shows for a session client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub listening: bool,
    pub error: Option<String>,
    pub transcript: String,
}

impl SessionView {
    pub fn status_label(&self) -> &'static str {
        if self.listening {
            "LISTENING"
        } else {
            "INACTIVE"
        }
    }

    pub fn start_enabled(&self) -> bool {
        !self.listening
    }

    pub fn stop_enabled(&self) -> bool {
        self.listening
    }
}

impl fmt::Display for SessionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let control = |enabled: bool| if enabled { "enabled" } else { "disabled" };

        writeln!(
            f,
            "[Start Listening: {}] [Stop Listening: {}]",
            control(self.start_enabled()),
            control(self.stop_enabled())
        )?;
        writeln!(f, "Status: {}", self.status_label())?;
        if let Some(error) = &self.error {
            writeln!(f, "Error: {}", error)?;
        }
        write!(f, "Transcribed Text: ")?;
        if self.transcript.is_empty() {
            write!(f, "...")
        } else {
            write!(f, "{}", self.transcript)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_view() {
        let view = SessionView::default();
        let rendered = view.to_string();

        assert!(view.start_enabled());
        assert!(!view.stop_enabled());
        assert!(rendered.contains("Status: INACTIVE"));
        assert!(rendered.ends_with("Transcribed Text: ..."));
        assert!(!rendered.contains("Error:"));
    }

    #[test]
    fn test_listening_view_with_error() {
        let view = SessionView {
            listening: true,
            error: Some("boom".to_string()),
            transcript: "hello world".to_string(),
        };
        let rendered = view.to_string();

        assert!(!view.start_enabled());
        assert!(view.stop_enabled());
        assert!(rendered.contains("Status: LISTENING"));
        assert!(rendered.contains("Error: boom"));
        assert!(rendered.ends_with("Transcribed Text: hello world"));
    }
}
