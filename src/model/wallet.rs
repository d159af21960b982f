use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A currency wallet tracked by the wallet store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub currency: String,
    pub balance: f64,
    pub created_at: DateTime<Utc>,
}

impl Wallet {
    pub fn new(id: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            currency: currency.into(),
            balance: 0.0,
            created_at: Utc::now(),
        }
    }
}

/// Balance adjustment applied to a stored wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletPatch {
    pub balance: Option<f64>,
}
