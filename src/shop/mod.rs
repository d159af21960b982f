//! Gift-card shop flows: catalog, invoice creation, redemption.

pub mod catalog;
pub mod classify;
pub mod error;
pub mod order_manager;

pub use catalog::fetch_catalog;
pub use classify::{classify_redemption_error, PENDING_MESSAGES};
pub use error::ShopError;
pub use order_manager::{OrderLifecycleManager, PurchaserContext};
