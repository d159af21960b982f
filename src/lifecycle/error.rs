//! Error types for the bootstrap pipeline.

use crate::api::ApiError;
use crate::framework::StoreError;
use crate::model::Network;
use thiserror::Error;

/// Errors that abort a bootstrap attempt.
///
/// The best-effort user-data fetch never produces one of these — its
/// failures are absorbed at the fetch boundary.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Identity generation failed earlier and nothing usable is held.
    /// Every network call needs an identity, so the pipeline stops here.
    #[error("App identity unavailable for {0}")]
    IdentityUnavailable(Network),

    /// API client construction failed.
    #[error("API client setup failed: {0}")]
    ApiSetup(#[from] ApiError),

    /// A subsystem init stage failed.
    #[error("Subsystem init failed: {0}")]
    Subsystem(#[from] StoreError),
}
