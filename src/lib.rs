pub mod broker;
pub mod config;
pub mod http;
pub mod session;
pub mod ui;

pub use broker::{BrokerError, TokenBroker};
pub use config::{BrokerConfig, Config, Credential};
pub use http::{create_router, AppState};
pub use session::{
    HttpTokenSource, RealtimeEvent, RealtimeProvider, RealtimeSession, ScriptedProvider,
    SessionClient, SessionDriver, SessionError, SessionHandle, SessionSettings, SessionStats,
    SessionToken, StartSessionRequest, SttProvider, TokenSource,
};
pub use ui::SessionView;
