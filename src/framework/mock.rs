//! # Mock Framework
//!
//! Utilities for testing store clients in isolation.
//!
//! Use [`MockStoreClient`] to get a client whose responses you script with
//! expectation builders, then `verify()` that everything you scripted was
//! actually consumed.

use crate::framework::{Response, StoreClient, StoreEntity, StoreError, StoreRequest};
use crate::model::Network;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock client.
#[allow(dead_code)] // network/key fields document intent; matching is positional
enum Expectation<T: StoreEntity> {
    Init {
        network: Network,
        response: Result<usize, StoreError>,
    },
    Insert {
        network: Network,
        response: Result<T::Key, StoreError>,
    },
    Get {
        network: Network,
        key: T::Key,
        response: Result<Option<T>, StoreError>,
    },
    Patch {
        network: Network,
        key: T::Key,
        response: Result<T, StoreError>,
    },
    List {
        network: Network,
        response: Result<Vec<T>, StoreError>,
    },
}

/// A mock store client with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut mock = MockStoreClient::<GiftCardOrder>::new();
/// mock.expect_get(Network::Mainnet, "inv_1".to_string()).return_ok(Some(order));
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockStoreClient<T: StoreEntity> {
    client: StoreClient<T>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: StoreEntity> MockStoreClient<T> {
    /// Creates a new mock client with no expectations.
    ///
    /// A request arriving with no matching expectation panics the responder
    /// task, which fails the awaiting test with [`StoreError::Dropped`].
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Spawn background task to answer requests from the script
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        StoreRequest::Init { respond_to, .. },
                        Some(Expectation::Init { response, .. }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Insert { respond_to, .. },
                        Some(Expectation::Insert { response, .. }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Get { respond_to, .. },
                        Some(Expectation::Get { response, .. }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Patch { respond_to, .. },
                        Some(Expectation::Patch { response, .. }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::List { respond_to, .. },
                        Some(Expectation::List { response, .. }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected store request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    /// Expects an `init` operation.
    pub fn expect_init(&mut self, network: Network) -> InitExpectationBuilder<T> {
        InitExpectationBuilder {
            network,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `insert` operation.
    pub fn expect_insert(&mut self, network: Network) -> InsertExpectationBuilder<T> {
        InsertExpectationBuilder {
            network,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, network: Network, key: T::Key) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            network,
            key,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `patch` operation.
    pub fn expect_patch(&mut self, network: Network, key: T::Key) -> PatchExpectationBuilder<T> {
        PatchExpectationBuilder {
            network,
            key,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self, network: Network) -> ListExpectationBuilder<T> {
        ListExpectationBuilder {
            network,
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

impl<T: StoreEntity> Default for MockStoreClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `init` expectations.
pub struct InitExpectationBuilder<T: StoreEntity> {
    network: Network,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: StoreEntity> InitExpectationBuilder<T> {
    pub fn return_ok(self, count: usize) {
        self.push(Ok(count));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<usize, StoreError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Init {
                network: self.network,
                response,
            });
    }
}

/// Builder for `insert` expectations.
pub struct InsertExpectationBuilder<T: StoreEntity> {
    network: Network,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: StoreEntity> InsertExpectationBuilder<T> {
    pub fn return_ok(self, key: T::Key) {
        self.push(Ok(key));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T::Key, StoreError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Insert {
                network: self.network,
                response,
            });
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: StoreEntity> {
    network: Network,
    key: T::Key,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: StoreEntity> GetExpectationBuilder<T> {
    pub fn return_ok(self, value: Option<T>) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Option<T>, StoreError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Get {
                network: self.network,
                key: self.key,
                response,
            });
    }
}

/// Builder for `patch` expectations.
pub struct PatchExpectationBuilder<T: StoreEntity> {
    network: Network,
    key: T::Key,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: StoreEntity> PatchExpectationBuilder<T> {
    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T, StoreError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Patch {
                network: self.network,
                key: self.key,
                response,
            });
    }
}

/// Builder for `list` expectations.
pub struct ListExpectationBuilder<T: StoreEntity> {
    network: Network,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: StoreEntity> ListExpectationBuilder<T> {
    pub fn return_ok(self, values: Vec<T>) {
        self.push(Ok(values));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Vec<T>, StoreError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::List {
                network: self.network,
                response,
            });
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting raw requests.
///
/// # Testing Strategy
/// When a test cares about the exact request a client sends (not just the
/// scripted response), it can inspect the [`StoreRequest`] values arriving
/// on the receiver and answer them by hand.
pub fn raw_client<T: StoreEntity>(
    buffer_size: usize,
) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Helper to verify that the next message is an Insert request.
pub async fn expect_insert<T: StoreEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(Network, T, Response<T::Key>)> {
    match receiver.recv().await {
        Some(StoreRequest::Insert { network, item, respond_to }) => {
            Some((network, item, respond_to))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Wallet;

    #[tokio::test]
    async fn test_raw_client() {
        let (client, mut receiver) = raw_client::<Wallet>(10);

        // Drive an insert from a separate task, answer it by hand
        let insert_task = tokio::spawn({
            let client = client.clone();
            async move {
                client
                    .insert(Network::Mainnet, Wallet::new("w1", "USD"))
                    .await
            }
        });

        let (network, wallet, responder) = expect_insert(&mut receiver)
            .await
            .expect("Expected Insert request");
        assert_eq!(network, Network::Mainnet);
        assert_eq!(wallet.id, "w1");
        responder.send(Ok("w1".to_string())).unwrap();

        let result = insert_task.await.unwrap();
        assert_eq!(result, Ok("w1".to_string()));
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockStoreClient::<Wallet>::new();

        mock.expect_insert(Network::Mainnet).return_ok("w1".to_string());
        mock.expect_get(Network::Mainnet, "w1".to_string())
            .return_ok(Some(Wallet::new("w1", "EUR")));

        let client = mock.client();

        let key = client
            .insert(Network::Mainnet, Wallet::new("w1", "EUR"))
            .await
            .unwrap();
        assert_eq!(key, "w1");

        let fetched = client.get(Network::Mainnet, "w1".to_string()).await.unwrap();
        assert_eq!(fetched.unwrap().currency, "EUR");

        mock.verify();
    }
}
