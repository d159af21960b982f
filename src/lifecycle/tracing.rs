//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing`
//! crate for the whole effect layer.
//!
//! The compact format hides the crate/module prefix (`with_target(false)`)
//! — the store actors already tag every event with `entity_type`, which
//! keeps log lines short while preserving the structured fields.
//!
//! ## Usage
//!
//! ```bash
//! # Compact logs
//! RUST_LOG=info cargo test
//!
//! # Show full payloads at function entry points
//! RUST_LOG=debug cargo test
//!
//! # Filter to one module
//! RUST_LOG=vela_wallet_core::shop=debug cargo test
//! ```
//!
//! Functions log full payloads **once** at the start with the `?`/`%`
//! field syntax (e.g. `debug!(?receipt, "...")`); subsequent lines stay
//! concise and show only the workflow hierarchy.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - entity_type fields carry the context
        .compact() // Compact format shows spans inline (e.g., "redeem:apply_redemption")
        .init();
}
