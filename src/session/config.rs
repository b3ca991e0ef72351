use serde::{Deserialize, Serialize};

/// Speech-to-text engine the realtime provider runs behind the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SttProvider {
    #[default]
    Deepgram,
    Gladia,
}

impl SttProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            SttProvider::Deepgram => "deepgram",
            SttProvider::Gladia => "gladia",
        }
    }
}

/// Session settings from the `[session]` config section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Avatar to attach the session to (a session always needs one)
    pub avatar_name: String,

    /// Transcription engine
    pub stt_provider: SttProvider,

    /// Spoken language code, e.g. "hi" or "en"
    pub language: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            avatar_name: "default".to_string(),
            stt_provider: SttProvider::Deepgram,
            language: "hi".to_string(),
        }
    }
}

impl SessionSettings {
    pub fn start_request(&self) -> StartSessionRequest {
        StartSessionRequest {
            avatar_name: self.avatar_name.clone(),
            stt_settings: SttSettings {
                provider: self.stt_provider,
                language: self.language.clone(),
            },
        }
    }
}

/// Payload handed to [`RealtimeSession::start`](super::RealtimeSession::start)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    pub avatar_name: String,
    pub stt_settings: SttSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SttSettings {
    pub provider: SttProvider,
    pub language: String,
}
