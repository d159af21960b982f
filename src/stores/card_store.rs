//! Entitlement-card store.
//!
//! Seeded from the user snapshot's cards slice; balances arrive as a
//! separate slice in the same snapshot and are merged in by id at init
//! time.

use crate::framework::{StoreActor, StoreClient, StoreEntity, StoreError};
use crate::model::{Card, CardBalance, Network};
use crate::stores::StoreHandle;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Seed slices for a network's card shelf.
#[derive(Debug, Default)]
pub struct CardSeed {
    pub cards: Vec<Card>,
    pub balances: Vec<CardBalance>,
}

/// Balance refresh applied to a stored card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardPatch {
    pub balance: Option<f64>,
}

impl StoreEntity for Card {
    type Key = String;
    type Seed = CardSeed;
    type Patch = CardPatch;

    fn key(&self) -> String {
        self.id.clone()
    }

    fn from_seed(seed: CardSeed) -> Vec<Self> {
        let balances: HashMap<String, f64> = seed
            .balances
            .into_iter()
            .map(|b| (b.id, b.balance))
            .collect();
        seed.cards
            .into_iter()
            .map(|mut card| {
                if let Some(balance) = balances.get(&card.id) {
                    card.balance = Some(*balance);
                }
                card
            })
            .collect()
    }

    fn apply(&mut self, patch: CardPatch) -> Result<(), String> {
        if let Some(balance) = patch.balance {
            self.balance = Some(balance);
        }
        Ok(())
    }
}

/// Creates a new card store actor and its client.
pub fn new() -> (StoreActor<Card>, CardStoreClient) {
    let (actor, generic_client) = StoreActor::new(32);
    (actor, CardStoreClient::new(generic_client))
}

/// Client for the entitlement-card store.
#[derive(Clone)]
pub struct CardStoreClient {
    inner: StoreClient<Card>,
}

impl CardStoreClient {
    pub fn new(inner: StoreClient<Card>) -> Self {
        Self { inner }
    }

    /// Seed the network's card shelf. Third subsystem-init stage.
    #[instrument(skip(self, seed))]
    pub async fn init(&self, network: Network, seed: CardSeed) -> Result<usize, StoreError> {
        debug!(
            cards = seed.cards.len(),
            balances = seed.balances.len(),
            "Sending request"
        );
        self.inner.init(network, seed).await
    }

    #[instrument(skip(self))]
    pub async fn set_balance(
        &self,
        network: Network,
        card_id: String,
        balance: f64,
    ) -> Result<Card, StoreError> {
        debug!("Sending request");
        self.inner
            .patch(network, card_id, CardPatch { balance: Some(balance) })
            .await
    }
}

#[async_trait]
impl StoreHandle<Card> for CardStoreClient {
    fn inner(&self) -> &StoreClient<Card> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str) -> Card {
        Card {
            id: id.to_string(),
            currency: "USD".to_string(),
            last_four_digits: None,
            card_type: None,
            balance: None,
        }
    }

    #[test]
    fn test_seed_merges_balances_by_id() {
        let seed = CardSeed {
            cards: vec![card("c_1"), card("c_2")],
            balances: vec![CardBalance {
                id: "c_2".to_string(),
                balance: 40.0,
            }],
        };
        let mut shelved = Card::from_seed(seed);
        shelved.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(shelved[0].balance, None);
        assert_eq!(shelved[1].balance, Some(40.0));
    }
}
