//! Orchestration layer: the composition root and the bootstrap pipeline.

pub mod bootstrap;
pub mod error;
pub mod system;
pub mod tracing;

pub use bootstrap::BootstrapSequencer;
pub use error::BootstrapError;
pub use system::WalletSystem;
