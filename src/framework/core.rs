//! # Core Store Framework
//!
//! This module defines the generic building blocks for the wallet's
//! network-partitioned stores.
//!
//! ## Key Types
//!
//! - [`StoreEntity`]: The trait that all stored resource types must implement.
//! - [`StoreActor`]: The generic actor that owns one store's shelves.
//! - [`StoreClient`]: The generic client for talking to a store actor.
//! - [`StoreError`]: Common errors (e.g., Closed, NotFound).

use crate::model::Network;
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any resource must implement to live in a [`StoreActor`].
///
/// # Architecture Note
/// Every durable thing in the wallet (wallets, linked-account profile,
/// entitlement cards, gift-card orders) is a keyed record inside a
/// per-network shelf. By defining one contract for all of them, the store
/// loop is written *once* and each domain only supplies its data shape.
///
/// Keys are caller- or remote-assigned (an invoice id, a card id) — the
/// store never invents identifiers, because the backend already did.
pub trait StoreEntity: Clone + Send + Sync + 'static {
    /// The unique identifier within a network shelf.
    type Key: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Bootstrap seed data the shelf is initialized from.
    type Seed: Send + Sync + Debug;

    /// Partial update merged into a stored entity.
    type Patch: Send + Sync + Debug;

    /// Key under which this entity is shelved.
    fn key(&self) -> Self::Key;

    /// Expand seed data into the shelf's initial contents.
    fn from_seed(seed: Self::Seed) -> Vec<Self>;

    /// Merge a patch into the entity. A returned error rejects the update
    /// and leaves the stored entity untouched.
    fn apply(&mut self, patch: Self::Patch) -> Result<(), String>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the store framework itself.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StoreError {
    #[error("Store closed")]
    Closed,
    #[error("Store dropped response channel")]
    Dropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Update rejected: {0}")]
    Rejected(String),
}

/// Type alias for the one-shot response channel used by store actors.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Internal message type sent to a store actor.
///
/// The vocabulary is deliberately small: `Init` replaces a network's shelf
/// from bootstrap seed data, `Insert` shelves one new record, `Get`/`List`
/// read, and `Patch` merges a partial update through the entity's own
/// [`StoreEntity::apply`]. Everything is scoped to a [`Network`] so
/// testnet state never leaks into mainnet state.
#[derive(Debug)]
pub enum StoreRequest<T: StoreEntity> {
    Init {
        network: Network,
        seed: T::Seed,
        respond_to: Response<usize>,
    },
    Insert {
        network: Network,
        item: T,
        respond_to: Response<T::Key>,
    },
    Get {
        network: Network,
        key: T::Key,
        respond_to: Response<Option<T>>,
    },
    Patch {
        network: Network,
        key: T::Key,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    List {
        network: Network,
        respond_to: Response<Vec<T>>,
    },
}

// =============================================================================
// 3. THE GENERIC STORE ACTOR
// =============================================================================

/// The generic actor that owns one store's per-network shelves.
///
/// # Concurrency Model
/// Each store runs in its own Tokio task and processes requests
/// *sequentially*, so no `Mutex` guards the shelves — and, just as
/// important, two racing updates to the same key (say, two redemption
/// attempts for one invoice) are serialized by construction.
pub struct StoreActor<T: StoreEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    shelves: HashMap<Network, HashMap<T::Key, T>>,
}

impl<T: StoreEntity> StoreActor<T> {
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            shelves: HashMap::new(),
        };
        let client = StoreClient::new(sender);
        (actor, client)
    }

    fn shelf(&mut self, network: Network) -> &mut HashMap<T::Key, T> {
        self.shelves.entry(network).or_default()
    }

    /// Runs the store's event loop, processing requests until the channel
    /// closes.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "GiftCardOrder" instead of
        // "vela_wallet_core::model::order::GiftCardOrder")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Init { network, seed, respond_to } => {
                    debug!(entity_type, %network, ?seed, "Init");
                    let items = T::from_seed(seed);
                    let shelf: HashMap<T::Key, T> =
                        items.into_iter().map(|item| (item.key(), item)).collect();
                    let count = shelf.len();
                    self.shelves.insert(network, shelf);
                    info!(entity_type, %network, count, "Initialized");
                    let _ = respond_to.send(Ok(count));
                }
                StoreRequest::Insert { network, item, respond_to } => {
                    let key = item.key();
                    debug!(entity_type, %network, %key, "Insert");
                    let shelf = self.shelf(network);
                    shelf.insert(key.clone(), item);
                    info!(entity_type, %network, %key, size = shelf.len(), "Inserted");
                    let _ = respond_to.send(Ok(key));
                }
                StoreRequest::Get { network, key, respond_to } => {
                    let item = self
                        .shelves
                        .get(&network)
                        .and_then(|shelf| shelf.get(&key))
                        .cloned();
                    let found = item.is_some();
                    debug!(entity_type, %network, %key, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::Patch { network, key, patch, respond_to } => {
                    debug!(entity_type, %network, %key, ?patch, "Patch");
                    match self
                        .shelves
                        .get_mut(&network)
                        .and_then(|shelf| shelf.get_mut(&key))
                    {
                        Some(item) => {
                            if let Err(e) = item.apply(patch) {
                                warn!(entity_type, %network, %key, error = %e, "Patch rejected");
                                let _ = respond_to.send(Err(StoreError::Rejected(e)));
                                continue;
                            }
                            info!(entity_type, %network, %key, "Patched");
                            let _ = respond_to.send(Ok(item.clone()));
                        }
                        None => {
                            warn!(entity_type, %network, %key, "Not found");
                            let _ = respond_to.send(Err(StoreError::NotFound(key.to_string())));
                        }
                    }
                }
                StoreRequest::List { network, respond_to } => {
                    let items: Vec<T> = self
                        .shelves
                        .get(&network)
                        .map(|shelf| shelf.values().cloned().collect())
                        .unwrap_or_default();
                    debug!(entity_type, %network, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
            }
        }

        info!(entity_type, networks = self.shelves.len(), "Shutdown");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for interacting with a [`StoreActor`].
#[derive(Clone)]
pub struct StoreClient<T: StoreEntity> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: StoreEntity> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn init(&self, network: Network, seed: T::Seed) -> Result<usize, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Init { network, seed, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    pub async fn insert(&self, network: Network, item: T) -> Result<T::Key, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Insert { network, item, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    pub async fn get(&self, network: Network, key: T::Key) -> Result<Option<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Get { network, key, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    pub async fn patch(
        &self,
        network: Network,
        key: T::Key,
        patch: T::Patch,
    ) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Patch { network, key, patch, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    pub async fn list(&self, network: Network) -> Result<Vec<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::List { network, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: String,
        body: String,
    }

    #[derive(Debug)]
    struct NoteEdit {
        body: Option<String>,
    }

    impl StoreEntity for Note {
        type Key = String;
        type Seed = Vec<Note>;
        type Patch = NoteEdit;

        fn key(&self) -> String {
            self.id.clone()
        }

        fn from_seed(seed: Vec<Note>) -> Vec<Self> {
            seed
        }

        fn apply(&mut self, patch: NoteEdit) -> Result<(), String> {
            match patch.body {
                Some(body) if body.is_empty() => Err("empty body".to_string()),
                Some(body) => {
                    self.body = body;
                    Ok(())
                }
                None => Ok(()),
            }
        }
    }

    fn note(id: &str, body: &str) -> Note {
        Note {
            id: id.to_string(),
            body: body.to_string(),
        }
    }

    // --- Test ---

    #[tokio::test]
    async fn test_store_actor_lifecycle() {
        let (actor, client) = StoreActor::<Note>::new(10);
        tokio::spawn(actor.run());

        // 1. Init seeds a shelf for one network only
        let count = client
            .init(Network::Mainnet, vec![note("n1", "first")])
            .await
            .unwrap();
        assert_eq!(count, 1);
        assert!(client
            .get(Network::Testnet, "n1".to_string())
            .await
            .unwrap()
            .is_none());

        // 2. Insert
        client
            .insert(Network::Mainnet, note("n2", "second"))
            .await
            .unwrap();

        // 3. Get
        let fetched = client.get(Network::Mainnet, "n2".to_string()).await.unwrap();
        assert_eq!(fetched, Some(note("n2", "second")));

        // 4. Patch
        let patched = client
            .patch(
                Network::Mainnet,
                "n1".to_string(),
                NoteEdit { body: Some("edited".to_string()) },
            )
            .await
            .unwrap();
        assert_eq!(patched.body, "edited");

        // 5. Rejected patch leaves the entity untouched
        let err = client
            .patch(
                Network::Mainnet,
                "n1".to_string(),
                NoteEdit { body: Some(String::new()) },
            )
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::Rejected("empty body".to_string()));
        let unchanged = client.get(Network::Mainnet, "n1".to_string()).await.unwrap();
        assert_eq!(unchanged.unwrap().body, "edited");

        // 6. Patch on an unknown key
        let err = client
            .patch(Network::Mainnet, "nope".to_string(), NoteEdit { body: None })
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound("nope".to_string()));

        // 7. List
        let mut all = client.list(Network::Mainnet).await.unwrap();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(all.len(), 2);

        // 8. Re-init replaces the shelf
        let count = client.init(Network::Mainnet, vec![]).await.unwrap();
        assert_eq!(count, 0);
        assert!(client.list(Network::Mainnet).await.unwrap().is_empty());
    }
}
