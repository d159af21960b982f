//! Pure data structures shared across the crate: networks, identities,
//! user data, wallets, and gift-card order types.

pub mod identity;
pub mod network;
pub mod order;
pub mod user;
pub mod wallet;

pub use identity::*;
pub use network::*;
pub use order::*;
pub use user::*;
pub use wallet::*;
