//! Gift-card order types: what the shop endpoints speak on the wire and
//! what the gift-card store persists locally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;

/// Lifecycle state of a purchased gift card.
///
/// A freshly persisted order is `Unredeemed`. `Pending` and `Failure` only
/// ever come from an explicit redemption response (or its classified
/// absence) — they are never assumed. `Success` attaches the usable card
/// credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Unredeemed,
    Pending,
    Success,
    Failure,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Unredeemed => "UNREDEEMED",
            OrderStatus::Pending => "PENDING",
            OrderStatus::Success => "SUCCESS",
            OrderStatus::Failure => "FAILURE",
        };
        write!(f, "{}", s)
    }
}

/// Static configuration of a purchasable gift-card brand, as served by the
/// catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardConfig {
    pub name: String,
    pub currency: Option<String>,
    pub email_required: bool,
    pub phone_required: bool,
}

/// Caller-supplied purchase parameters, before contact details are
/// injected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftCardInvoiceParams {
    pub amount: f64,
    pub currency: String,
    pub brand: String,
    pub client_id: String,
}

/// The full invoice-creation payload sent upstream. Email and phone are
/// present only when the brand requires them and a value is available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    pub amount: f64,
    pub currency: String,
    pub brand: String,
    pub client_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub phone: Option<String>,
}

impl From<GiftCardInvoiceParams> for InvoiceRequest {
    fn from(params: GiftCardInvoiceParams) -> Self {
        Self {
            amount: params.amount,
            currency: params.currency,
            brand: params.brand,
            client_id: params.client_id,
            email: None,
            phone: None,
        }
    }
}

/// What the invoice-creation endpoints return: the remote order in its
/// CREATED stage, before anything is persisted locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDescriptor {
    pub invoice_id: String,
    pub access_key: String,
    #[serde(default)]
    pub total_discount: Option<f64>,
}

/// Payment invoice detail fetched after order creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub status: String,
    pub price: f64,
    pub currency: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub expiration_time: Option<DateTime<Utc>>,
}

/// Redemption call payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionRequest {
    pub access_key: String,
    pub client_id: String,
    pub invoice_id: String,
}

/// Redemption response body. A missing `status` on a successful call means
/// the card was delivered — the merge defaults it to `SUCCESS`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RedemptionReceipt {
    pub status: Option<OrderStatus>,
    pub card_number: Option<String>,
    pub pin: Option<String>,
    pub claim_code: Option<String>,
}

impl RedemptionReceipt {
    /// A receipt carrying only a locally classified status, used when the
    /// redemption transport failed.
    pub fn status_only(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// A gift-card purchase tracked from invoice creation through redemption.
///
/// `invoice_id` and `access_key` are assigned by the remote system at
/// creation and never change. `status` is the only field mutated after
/// creation, except that a successful redemption attaches the credential
/// fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftCardOrder {
    pub invoice_id: String,
    pub access_key: String,
    pub client_id: String,
    pub brand: String,
    pub currency: String,
    pub amount: f64,
    #[serde(default)]
    pub total_discount: Option<f64>,
    pub invoice: Invoice,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    #[serde(default)]
    pub user_eid: Option<String>,
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    pub pin: Option<String>,
    #[serde(default)]
    pub claim_code: Option<String>,
}

impl GiftCardOrder {
    /// Merge a redemption receipt into the order.
    ///
    /// Status defaults to `SUCCESS` when the receipt carries none;
    /// credential fields overwrite only when present.
    pub fn apply_receipt(&mut self, receipt: RedemptionReceipt) {
        self.status = receipt.status.unwrap_or(OrderStatus::Success);
        if receipt.card_number.is_some() {
            self.card_number = receipt.card_number;
        }
        if receipt.pin.is_some() {
            self.pin = receipt.pin;
        }
        if receipt.claim_code.is_some() {
            self.claim_code = receipt.claim_code;
        }
    }
}

/// Combined result of the three concurrent shop-catalog fetches.
///
/// Directory and integration payloads are opaque feed data for the UI and
/// stay schemaless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopCatalog {
    pub available_card_map: HashMap<String, Vec<CardConfig>>,
    pub categories_and_curations: serde_json::Value,
    pub integrations: serde_json::Value,
}
