use crate::framework::{StoreClient, StoreEntity, StoreError};
use crate::model::Network;
use async_trait::async_trait;

/// Trait for store-specific clients to inherit the standard read
/// operations.
///
/// This trait reduces boilerplate by providing default implementations for
/// `get` and `list`; each typed client only adds its domain verbs.
#[async_trait]
pub trait StoreHandle<T: StoreEntity>: Send + Sync {
    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<T>;

    /// Fetch an entity by key within a network shelf.
    #[tracing::instrument(skip(self))]
    async fn get(&self, network: Network, key: T::Key) -> Result<Option<T>, StoreError> {
        tracing::debug!("Sending request");
        self.inner().get(network, key).await
    }

    /// List a network shelf's contents.
    #[tracing::instrument(skip(self))]
    async fn list(&self, network: Network) -> Result<Vec<T>, StoreError> {
        tracing::debug!("Sending request");
        self.inner().list(network).await
    }
}
