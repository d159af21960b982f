//! The gift-card order lifecycle.
//!
//! `create_invoice` and `redeem` own every state transition an order
//! makes. The manager persists aggressively: an order lands in the store
//! the moment invoice creation succeeds (the user has paid for an
//! entitlement — losing the record is not an option), and every
//! redemption attempt is recorded whatever its outcome.

use crate::api::ShopGateway;
use crate::model::{
    CardConfig, GiftCardInvoiceParams, GiftCardOrder, InvoiceRequest, Network, OrderStatus,
    RedemptionReceipt, RedemptionRequest, SessionToken, UserProfile,
};
use crate::shop::{classify_redemption_error, ShopError};
use crate::stores::GiftCardStoreClient;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Who is buying: the synced profile (if any), the session token (if
/// paired), and explicitly supplied contact details as fallbacks.
///
/// Passed explicitly per call — the manager reads no ambient session
/// state.
#[derive(Debug, Clone, Default)]
pub struct PurchaserContext {
    pub profile: Option<UserProfile>,
    pub token: Option<SessionToken>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl PurchaserContext {
    fn should_sync(&self) -> bool {
        self.profile
            .as_ref()
            .is_some_and(|p| p.syncs_gift_card_purchases())
    }
}

/// Drives a purchase from invoice creation through redemption.
pub struct OrderLifecycleManager {
    network: Network,
    shop: Arc<dyn ShopGateway>,
    orders: GiftCardStoreClient,
}

impl OrderLifecycleManager {
    pub fn new(network: Network, shop: Arc<dyn ShopGateway>, orders: GiftCardStoreClient) -> Self {
        Self {
            network,
            shop,
            orders,
        }
    }

    /// Create an invoice for a gift-card purchase and persist the order at
    /// `UNREDEEMED`.
    ///
    /// Contact details are injected only when the brand requires them:
    /// email from the synced profile when the sync preference is on, else
    /// the explicitly supplied one. Purchases sync through the privileged
    /// token-bound path; everything else goes through the public payment
    /// path. On any failure nothing is persisted.
    #[instrument(skip(self, card_config, params, purchaser), fields(network = %self.network, brand = %params.brand))]
    pub async fn create_invoice(
        &self,
        card_config: &CardConfig,
        params: GiftCardInvoiceParams,
        purchaser: &PurchaserContext,
    ) -> Result<GiftCardOrder, ShopError> {
        debug!(?params, "create_invoice called");

        let should_sync = purchaser.should_sync();
        let mut request = InvoiceRequest::from(params.clone());
        if card_config.email_required {
            request.email = if should_sync {
                purchaser.profile.as_ref().and_then(|p| p.email.clone())
            } else {
                purchaser.email.clone()
            };
        }
        if card_config.phone_required {
            request.phone = purchaser.phone.clone();
        }

        let descriptor = match (&purchaser.token, should_sync) {
            (Some(token), true) => self.shop.create_invoice_paired(token, &request).await,
            _ => self.shop.create_invoice_public(&request).await,
        }
        .map_err(ShopError::OrderCreation)?;

        let invoice = self
            .shop
            .fetch_invoice(&descriptor.invoice_id)
            .await
            .map_err(ShopError::OrderCreation)?;

        let order = GiftCardOrder {
            invoice_id: descriptor.invoice_id,
            access_key: descriptor.access_key,
            client_id: params.client_id,
            brand: params.brand,
            currency: params.currency,
            amount: params.amount,
            total_discount: descriptor.total_discount,
            invoice,
            created_at: Utc::now(),
            status: OrderStatus::Unredeemed,
            user_eid: purchaser.profile.as_ref().and_then(|p| p.eid.clone()),
            card_number: None,
            pin: None,
            claim_code: None,
        };

        self.orders
            .insert_unredeemed(self.network, order.clone())
            .await?;
        info!(invoice_id = %order.invoice_id, "Gift card order persisted");
        Ok(order)
    }

    /// Attempt to redeem a stored order.
    ///
    /// A transport failure is never propagated: it is classified into
    /// `PENDING` (known still-processing wording) or `FAILURE` (anything
    /// else), and the order is updated and persisted on every branch.
    /// `FAILURE` is last-known status, not immutable truth — a later
    /// attempt may classify differently.
    #[instrument(skip(self), fields(network = %self.network))]
    pub async fn redeem(&self, invoice_id: &str) -> Result<GiftCardOrder, ShopError> {
        let order = self
            .orders
            .find(self.network, invoice_id)
            .await?
            .ok_or_else(|| ShopError::OrderNotFound(invoice_id.to_string()))?;

        let request = RedemptionRequest {
            access_key: order.access_key.clone(),
            client_id: order.client_id.clone(),
            invoice_id: order.invoice_id.clone(),
        };

        let receipt = match self.shop.redeem_gift_card(&request).await {
            Ok(receipt) => receipt,
            Err(err) => {
                let status = classify_redemption_error(err.remote_message().as_deref());
                debug!(%status, error = %err, "Redemption transport error classified");
                RedemptionReceipt::status_only(status)
            }
        };

        let updated = self
            .orders
            .apply_redemption(self.network, invoice_id, receipt)
            .await?;
        info!(invoice_id, status = %updated.status, "Redemption recorded");
        Ok(updated)
    }
}
