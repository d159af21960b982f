use serde::{Deserialize, Serialize};

/// Per-account settings that travel with the synced profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalSettings {
    pub sync_gift_card_purchases: bool,
}

/// The authenticated user's profile as returned by the user-data endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub eid: Option<String>,
    pub email: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub incentive_level_id: Option<String>,
    pub local_settings: LocalSettings,
}

impl UserProfile {
    pub fn syncs_gift_card_purchases(&self) -> bool {
        self.local_settings.sync_gift_card_purchases
    }
}

/// A debit-card entitlement linked to the user's account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub currency: String,
    #[serde(default)]
    pub last_four_digits: Option<String>,
    #[serde(default)]
    pub card_type: Option<String>,
    #[serde(default)]
    pub balance: Option<f64>,
}

/// Balance slice delivered alongside the cards in the initial user data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardBalance {
    pub id: String,
    pub balance: f64,
}

/// Everything the user-data refresh produces in one round trip.
///
/// Consumed exactly once by subsystem init; the bootstrap sequencer does
/// not hold on to it afterward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSnapshot {
    pub basic_info: UserProfile,
    pub cards: Vec<Card>,
    pub card_balances: Vec<CardBalance>,
}
