//! Application identity management.
//!
//! One Ed25519 keypair per network authenticates the app installation to
//! backend APIs. The provider creates identities lazily and hands out
//! clones; generation failure is reported through the diagnostic log
//! rather than the return type, because bootstrap wants to keep control
//! and decide the stop itself.

use crate::diag::DiagnosticLog;
use crate::model::{AppIdentity, Network};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use ed25519_dalek::SigningKey;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors around identity material.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IdentityError {
    /// The keypair primitive failed.
    #[error("Identity generation failed: {0}")]
    GenerationFailed(String),

    /// A held identity could not be decoded back into key material.
    #[error("Stored identity is malformed: {0}")]
    Malformed(String),
}

/// Opaque "generate a public/private identity pair" primitive.
pub trait IdentityKeygen: Send + Sync {
    fn generate(&self, network: Network) -> Result<AppIdentity, IdentityError>;
}

/// Production keygen: Ed25519 keypair from OS randomness, base64-encoded.
pub struct Ed25519Keygen;

impl IdentityKeygen for Ed25519Keygen {
    fn generate(&self, network: Network) -> Result<AppIdentity, IdentityError> {
        let mut rng = rand::rngs::OsRng;
        let signing_key = SigningKey::generate(&mut rng);
        let verifying_key = signing_key.verifying_key();
        Ok(AppIdentity {
            network,
            public_id: BASE64.encode(verifying_key.to_bytes()),
            private_key: BASE64.encode(signing_key.to_bytes()),
        })
    }
}

/// Owns the per-network identities. Everything else sees clones.
pub struct IdentityProvider {
    keygen: Arc<dyn IdentityKeygen>,
    identities: Mutex<HashMap<Network, AppIdentity>>,
    diag: DiagnosticLog,
}

impl IdentityProvider {
    pub fn new(keygen: Arc<dyn IdentityKeygen>, diag: DiagnosticLog) -> Self {
        Self {
            keygen,
            identities: Mutex::new(HashMap::new()),
            diag,
        }
    }

    /// Returns the network's identity, generating one if none is held or
    /// the held one lacks a private key.
    ///
    /// Generation failure does not surface as an error here: it is logged
    /// as a diagnostic and the method returns whatever is currently held
    /// (usually `None`). Callers must treat `None` as a hard stop for
    /// network initialization.
    pub fn ensure_identity(&self, network: Network) -> Option<AppIdentity> {
        let mut identities = self.identities.lock().unwrap();

        self.diag.info("Initializing app identity...");

        if let Some(identity) = identities.get(&network) {
            if identity.is_valid() {
                return Some(identity.clone());
            }
        }

        self.diag.info("Generating new app identity...");
        match self.keygen.generate(network) {
            Ok(identity) => {
                identities.insert(network, identity.clone());
                self.diag.info("Initialized app identity successfully.");
                Some(identity)
            }
            Err(err) => {
                self.diag
                    .error(format!("Error generating app identity: {}", err));
                identities.get(&network).cloned()
            }
        }
    }
}

/// Decode an identity's private key back into a signing key, for signing
/// privileged API requests.
pub fn signing_key(identity: &AppIdentity) -> Result<SigningKey, IdentityError> {
    let bytes = BASE64
        .decode(&identity.private_key)
        .map_err(|e| IdentityError::Malformed(e.to_string()))?;
    let seed: [u8; 32] = bytes
        .try_into()
        .map_err(|_| IdentityError::Malformed("expected a 32-byte seed".to_string()))?;
    Ok(SigningKey::from_bytes(&seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::LogLevel;

    struct FailingKeygen;

    impl IdentityKeygen for FailingKeygen {
        fn generate(&self, _network: Network) -> Result<AppIdentity, IdentityError> {
            Err(IdentityError::GenerationFailed("no entropy".to_string()))
        }
    }

    #[test]
    fn test_ensure_identity_is_stable() {
        let provider = IdentityProvider::new(Arc::new(Ed25519Keygen), DiagnosticLog::new());

        let first = provider.ensure_identity(Network::Mainnet).unwrap();
        let second = provider.ensure_identity(Network::Mainnet).unwrap();
        assert_eq!(first, second);

        // A different network gets its own identity
        let testnet = provider.ensure_identity(Network::Testnet).unwrap();
        assert_ne!(first.public_id, testnet.public_id);
    }

    #[test]
    fn test_generation_failure_is_reported_out_of_band() {
        let diag = DiagnosticLog::new();
        let provider = IdentityProvider::new(Arc::new(FailingKeygen), diag.clone());

        let held = provider.ensure_identity(Network::Mainnet);
        assert!(held.is_none());

        let errors: Vec<_> = diag
            .entries()
            .into_iter()
            .filter(|e| e.level == LogLevel::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("generating app identity"));
    }

    #[test]
    fn test_signing_key_roundtrip() {
        let identity = Ed25519Keygen.generate(Network::Mainnet).unwrap();
        let key = signing_key(&identity).unwrap();
        assert_eq!(
            BASE64.encode(key.verifying_key().to_bytes()),
            identity.public_id
        );
    }

    #[test]
    fn test_signing_key_rejects_garbage() {
        let identity = AppIdentity {
            network: Network::Mainnet,
            public_id: "pub".to_string(),
            private_key: "not-base64!!!".to_string(),
        };
        assert!(matches!(
            signing_key(&identity),
            Err(IdentityError::Malformed(_))
        ));
    }
}
