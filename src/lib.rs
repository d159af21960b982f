//! # Vela Wallet Core
//!
//! > **The headless effect layer of the Vela wallet.**
//!
//! This crate contains the orchestration logic behind the wallet app: the
//! multi-stage bootstrap pipeline and the gift-card order lifecycle. The
//! rendering layer, navigation, and persistence substrate live elsewhere
//! and talk to this crate through clients and watch channels.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Stores as Actors
//! Every durable piece of wallet state (wallets, the linked account,
//! entitlement cards, gift-card orders) lives in its own store actor with
//! per-network shelves. Each actor processes requests sequentially in its
//! own Tokio task:
//! - **No locks**: the store owns its state exclusively.
//! - **Serialized mutations**: two racing redemption attempts for one
//!   invoice cannot interleave — the state-machine invariants hold by
//!   construction.
//!
//! ### Best-Effort Boundaries
//! Two places absorb errors instead of propagating them: the user-data
//! refresh during bootstrap (the app must come up even when the profile
//! fetch fails) and the redemption transport (a paid-for entitlement must
//! never be lost to a flaky response — failures are classified into the
//! order's status instead).
//!
//! ### Explicit Context
//! Operations take `network`, tokens, and purchaser details as arguments.
//! There is no ambient session state to read or corrupt.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic store actor that powers every feature store.
//! - **Key items**: [`StoreEntity`](framework::StoreEntity), [`StoreActor`](framework::StoreActor).
//!
//! ### 2. The Model ([`model`])
//! Pure data: networks, identities, user snapshots, wallets, and the
//! gift-card order types with their wire shapes.
//!
//! ### 3. The Interface ([`api`], [`stores`])
//! Configured transport clients and typed store clients.
//! - **Key items**: [`ApiClientRegistry`](api::ApiClientRegistry),
//!   [`ShopGateway`](api::ShopGateway),
//!   [`GiftCardStoreClient`](stores::GiftCardStoreClient).
//!
//! ### 4. The Orchestrators ([`lifecycle`], [`shop`])
//! The composition root, the bootstrap pipeline, and the order lifecycle.
//! - **Key items**: [`WalletSystem`](lifecycle::WalletSystem),
//!   [`BootstrapSequencer`](lifecycle::BootstrapSequencer),
//!   [`OrderLifecycleManager`](shop::OrderLifecycleManager).
//!
//! Supporting cast: [`identity`] (per-network app keypairs), [`diag`]
//! (the clearable diagnostic trail), [`progress`] (the debounced progress
//! indicator signal).
//!
//! ## 🧪 Testing
//!
//! See [`framework::mock`] for scripting store clients without spawning
//! actors, and the `tests/` directory for the gateway-fake pattern used
//! to exercise the sequencer and order manager end to end.
//!
//! ```bash
//! # Run with info logs
//! RUST_LOG=info cargo test
//! ```

pub mod api;
pub mod diag;
pub mod framework;
pub mod identity;
pub mod lifecycle;
pub mod model;
pub mod progress;
pub mod shop;
pub mod stores;
