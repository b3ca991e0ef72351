use axum::http::StatusCode;
use thiserror::Error;

/// Failures of a single token issuance
#[derive(Error, Debug)]
pub enum BrokerError {
    #[error("Server is missing HEYGEN_API_KEY.")]
    MissingCredential,

    #[error("Upstream returned {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    #[error("Invalid response from token endpoint: {body}")]
    Parse { body: String },

    /// Success status with a body that is not JSON at all
    #[error("Token endpoint returned non-JSON body: {body}")]
    Decode { body: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl BrokerError {
    /// Status reported to the caller
    pub fn status_code(&self) -> StatusCode {
        match self {
            BrokerError::Upstream { status, .. } => *status,
            BrokerError::MissingCredential
            | BrokerError::Parse { .. }
            | BrokerError::Decode { .. }
            | BrokerError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Plain-text body reported to the caller
    ///
    /// Only the upstream error text is passed through; parse and transport
    /// details stay in the server log.
    pub fn public_message(&self) -> String {
        match self {
            BrokerError::MissingCredential => self.to_string(),
            BrokerError::Upstream { body, .. } => {
                format!("Failed to retrieve access token: {}", body)
            }
            BrokerError::Parse { .. } => "Failed to parse token from Heygen response.".to_string(),
            BrokerError::Decode { .. } | BrokerError::Transport(_) => {
                "An internal server error occurred.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_is_propagated() {
        let err = BrokerError::Upstream {
            status: StatusCode::UNAUTHORIZED,
            body: "invalid key".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            err.public_message(),
            "Failed to retrieve access token: invalid key"
        );
    }

    #[test]
    fn test_parse_failure_hides_body() {
        let err = BrokerError::Parse {
            body: r#"{"data":{"secret":"x"}}"#.to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.public_message().contains("secret"));
    }

    #[test]
    fn test_non_json_body_is_internal_error() {
        let err = BrokerError::Decode {
            body: "<html>gateway</html>".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "An internal server error occurred.");
    }

    #[test]
    fn test_missing_credential_message() {
        let err = BrokerError::MissingCredential;
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Server is missing HEYGEN_API_KEY.");
    }
}
