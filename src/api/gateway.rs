//! Transport seams.
//!
//! The orchestrators talk to the backend through these traits rather than
//! the concrete clients, so tests can substitute scripted fakes without a
//! network in sight. Production wiring binds them to [`RestApi`] and
//! [`GraphQlApi`].
//!
//! [`RestApi`]: crate::api::RestApi
//! [`GraphQlApi`]: crate::api::GraphQlApi

use crate::api::ApiError;
use crate::model::{
    CardConfig, Invoice, InvoiceRequest, Network, OrderDescriptor, RedemptionReceipt,
    RedemptionRequest, SessionToken, UserSnapshot,
};
use async_trait::async_trait;
use std::collections::HashMap;

/// Authenticated user-data endpoint.
///
/// Implemented by [`ApiClientRegistry`](crate::api::ApiClientRegistry),
/// which routes to the network's configured GraphQL client.
#[async_trait]
pub trait UserGateway: Send + Sync {
    /// One round trip fetching the profile, cards, and card balances.
    async fn fetch_all_user_data(
        &self,
        network: Network,
        token: &SessionToken,
    ) -> Result<UserSnapshot, ApiError>;
}

/// Gift-card shop endpoints: invoice creation (privileged and public),
/// invoice lookup, redemption, and the catalog trio.
#[async_trait]
pub trait ShopGateway: Send + Sync {
    /// Privileged invoice creation, bound to the session token and signed
    /// with the app identity.
    async fn create_invoice_paired(
        &self,
        token: &SessionToken,
        request: &InvoiceRequest,
    ) -> Result<OrderDescriptor, ApiError>;

    /// Public payment path for sessions that do not sync purchases.
    async fn create_invoice_public(
        &self,
        request: &InvoiceRequest,
    ) -> Result<OrderDescriptor, ApiError>;

    async fn fetch_invoice(&self, invoice_id: &str) -> Result<Invoice, ApiError>;

    async fn redeem_gift_card(
        &self,
        request: &RedemptionRequest,
    ) -> Result<RedemptionReceipt, ApiError>;

    /// Available card catalog for a country, optionally scoped to the
    /// user's incentive level.
    async fn fetch_available_cards(
        &self,
        country: &str,
        incentive_level_id: Option<&str>,
    ) -> Result<HashMap<String, Vec<CardConfig>>, ApiError>;

    async fn fetch_directory(&self) -> Result<serde_json::Value, ApiError>;

    async fn fetch_integrations(&self) -> Result<serde_json::Value, ApiError>;
}
