use crate::model::Network;
use serde::{Deserialize, Serialize};

/// Per-network keypair authenticating the *application* (not the end user)
/// to backend APIs.
///
/// `private_key` is a base64-encoded Ed25519 seed and `public_id` the
/// base64-encoded verifying key. The [`IdentityProvider`](crate::identity::IdentityProvider)
/// owns the only mutable copy; everything else works on clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppIdentity {
    pub network: Network,
    pub public_id: String,
    pub private_key: String,
}

impl AppIdentity {
    /// An identity is usable only if it actually carries a private key.
    pub fn is_valid(&self) -> bool {
        !self.public_id.is_empty() && !self.private_key.is_empty()
    }
}

/// Long-lived session token proving the user has linked an account on a
/// network. Presence of a token is what "paired" means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
