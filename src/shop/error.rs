//! Error types for the gift-card shop flows.

use crate::api::ApiError;
use crate::framework::StoreError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum ShopError {
    /// Invoice creation or the follow-up invoice lookup failed. Nothing
    /// was persisted.
    #[error("Order creation failed: {0}")]
    OrderCreation(#[source] ApiError),

    /// No stored order matches the invoice id.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// The order store could not be read or updated.
    #[error("Order store error: {0}")]
    Store(#[from] StoreError),
}
