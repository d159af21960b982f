//! Feature stores: typed clients over the generic store framework.
//!
//! Each store file pairs a [`StoreEntity`](crate::framework::StoreEntity)
//! implementation with a domain client and a factory `new()` returning the
//! actor and its client.

pub mod account_store;
pub mod card_store;
pub mod gift_card_store;
pub mod handle;
pub mod wallet_store;

pub use account_store::AccountStoreClient;
pub use card_store::{CardPatch, CardSeed, CardStoreClient};
pub use gift_card_store::GiftCardStoreClient;
pub use handle::StoreHandle;
pub use wallet_store::WalletStoreClient;
