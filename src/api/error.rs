//! Error types for the API clients.

use crate::identity::IdentityError;
use thiserror::Error;

/// Errors produced by the REST and GraphQL clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status. `body` keeps the raw
    /// response text: redemption classification and diagnostics both need
    /// what the remote actually said.
    #[error("HTTP {status} from {url}")]
    Http {
        url: String,
        status: u16,
        body: String,
    },

    /// The request never produced a usable response.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx envelope carrying an in-band error field.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// The response body did not decode into the expected shape.
    #[error("Response decoding failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request could not be signed with the app identity.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// No clients have been configured for the network yet.
    #[error("API clients not configured for {0}")]
    NotConfigured(crate::model::Network),
}

impl ApiError {
    /// The human-meaningful message the remote system attached, if any.
    ///
    /// For an [`ApiError::Http`] error this is the `message` field of the
    /// JSON body; for [`ApiError::Rpc`] the in-band error text.
    pub fn remote_message(&self) -> Option<String> {
        match self {
            ApiError::Http { body, .. } => serde_json::from_str::<serde_json::Value>(body)
                .ok()
                .and_then(|v| {
                    v.get("message")
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                }),
            ApiError::Rpc(message) => Some(message.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_message_from_http_body() {
        let err = ApiError::Http {
            url: "https://vela.cash/gift-cards/redeem".to_string(),
            status: 400,
            body: r#"{"message":"Card creation delayed"}"#.to_string(),
        };
        assert_eq!(err.remote_message().as_deref(), Some("Card creation delayed"));
    }

    #[test]
    fn test_remote_message_absent_for_unstructured_body() {
        let err = ApiError::Http {
            url: "https://vela.cash/gift-cards/redeem".to_string(),
            status: 502,
            body: "<html>Bad Gateway</html>".to_string(),
        };
        assert_eq!(err.remote_message(), None);
    }
}
