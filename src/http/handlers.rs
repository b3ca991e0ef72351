use super::state::AppState;
use crate::broker::BrokerError;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::error;

/// POST /api/get-access-token
/// Returns the session token as plain text, or a plain-text error
pub async fn get_access_token(State(state): State<AppState>) -> impl IntoResponse {
    match state.broker.issue_token().await {
        Ok(token) => (StatusCode::OK, token).into_response(),
        Err(e) => {
            match &e {
                BrokerError::MissingCredential => {
                    error!("Token request rejected: HEYGEN_API_KEY is not configured");
                }
                BrokerError::Transport(err) => {
                    error!("Error retrieving access token: {}", err);
                }
                // Already logged with the upstream body
                BrokerError::Upstream { .. }
                | BrokerError::Parse { .. }
                | BrokerError::Decode { .. } => {}
            }
            (e.status_code(), e.public_message()).into_response()
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
