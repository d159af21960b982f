//! Linked-account store: the synced user profile per network.
//!
//! A network holds at most one profile; the shelf is empty for unpaired
//! sessions or when the best-effort refresh produced nothing.

use crate::framework::{StoreActor, StoreClient, StoreEntity, StoreError};
use crate::model::{Network, UserProfile};
use crate::stores::StoreHandle;
use async_trait::async_trait;
use tracing::{debug, instrument};

impl StoreEntity for UserProfile {
    type Key = String;
    type Seed = Option<UserProfile>;
    type Patch = UserProfile;

    fn key(&self) -> String {
        self.eid
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| "account".to_string())
    }

    fn from_seed(seed: Option<UserProfile>) -> Vec<Self> {
        seed.into_iter().collect()
    }

    // Profile updates arrive as full snapshots from the backend.
    fn apply(&mut self, patch: UserProfile) -> Result<(), String> {
        *self = patch;
        Ok(())
    }
}

/// Creates a new account store actor and its client.
pub fn new() -> (StoreActor<UserProfile>, AccountStoreClient) {
    let (actor, generic_client) = StoreActor::new(32);
    (actor, AccountStoreClient::new(generic_client))
}

/// Client for the linked-account store.
#[derive(Clone)]
pub struct AccountStoreClient {
    inner: StoreClient<UserProfile>,
}

impl AccountStoreClient {
    pub fn new(inner: StoreClient<UserProfile>) -> Self {
        Self { inner }
    }

    /// Seed the network's account shelf with the snapshot's profile slice.
    /// Second subsystem-init stage.
    #[instrument(skip(self, profile))]
    pub async fn init(
        &self,
        network: Network,
        profile: Option<UserProfile>,
    ) -> Result<usize, StoreError> {
        debug!(has_profile = profile.is_some(), "Sending request");
        self.inner.init(network, profile).await
    }

    /// The network's synced profile, if any.
    #[instrument(skip(self))]
    pub async fn profile(&self, network: Network) -> Result<Option<UserProfile>, StoreError> {
        debug!("Sending request");
        Ok(self.inner.list(network).await?.into_iter().next())
    }
}

#[async_trait]
impl StoreHandle<UserProfile> for AccountStoreClient {
    fn inner(&self) -> &StoreClient<UserProfile> {
        &self.inner
    }
}
