use crate::broker::TokenBroker;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub broker: Arc<TokenBroker>,
}

impl AppState {
    pub fn new(broker: TokenBroker) -> Self {
        Self {
            broker: Arc::new(broker),
        }
    }
}
