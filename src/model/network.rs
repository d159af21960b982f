use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The backend environment a session is bound to.
///
/// Every store shelf, identity, and configured API client is keyed by
/// network, so test sessions never bleed into production state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

/// Outcome of a bootstrap attempt, published on a watch channel for UI
/// consumption.
///
/// `Pending` is the resting state; a run ends in exactly one of
/// `Succeeded` or `Failed`, and a fresh run resets to `Pending` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BootstrapOutcome {
    Pending,
    Succeeded,
    Failed,
}
