//! Generic store framework for network-partitioned wallet state.
//!
//! This module provides the core building blocks for the keyed stores the
//! wallet keeps per network: wallets, the linked account, entitlement
//! cards, and gift-card orders.
//!
//! # Main Components
//!
//! - [`StoreEntity`] - Trait that stored resource types implement
//! - [`StoreActor`] - Generic actor that owns one store's shelves
//! - [`StoreClient`] - Type-safe client for talking to a store actor
//! - [`StoreError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full
//! store actors.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use core::*;
