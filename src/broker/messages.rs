use serde::Deserialize;

/// Response body of `POST /v1/streaming.create_token`
///
/// Every level is optional so a malformed success body still deserializes
/// and can be reported as a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTokenResponse {
    #[serde(default)]
    pub data: Option<TokenData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TokenData {
    #[serde(default)]
    pub token: Option<String>,
}

impl CreateTokenResponse {
    /// The token, if present and non-empty
    pub fn into_token(self) -> Option<String> {
        self.data
            .and_then(|d| d.token)
            .filter(|token| !token.is_empty())
    }
}
