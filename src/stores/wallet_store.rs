//! Wallet store: currency wallets per network.

use crate::framework::{StoreActor, StoreClient, StoreEntity, StoreError};
use crate::model::{Network, Wallet, WalletPatch};
use crate::stores::StoreHandle;
use async_trait::async_trait;
use tracing::{debug, instrument};

impl StoreEntity for Wallet {
    type Key = String;
    type Seed = ();
    type Patch = WalletPatch;

    fn key(&self) -> String {
        self.id.clone()
    }

    // Wallet shelves start empty; wallets are created by user action.
    fn from_seed(_seed: ()) -> Vec<Self> {
        Vec::new()
    }

    fn apply(&mut self, patch: WalletPatch) -> Result<(), String> {
        if let Some(balance) = patch.balance {
            if balance < 0.0 {
                return Err("balance cannot be negative".to_string());
            }
            self.balance = balance;
        }
        Ok(())
    }
}

/// Creates a new wallet store actor and its client.
pub fn new() -> (StoreActor<Wallet>, WalletStoreClient) {
    let (actor, generic_client) = StoreActor::new(32);
    (actor, WalletStoreClient::new(generic_client))
}

/// Client for the wallet store.
#[derive(Clone)]
pub struct WalletStoreClient {
    inner: StoreClient<Wallet>,
}

impl WalletStoreClient {
    pub fn new(inner: StoreClient<Wallet>) -> Self {
        Self { inner }
    }

    /// Reset the network's wallet shelf. First subsystem-init stage.
    #[instrument(skip(self))]
    pub async fn init(&self, network: Network) -> Result<usize, StoreError> {
        debug!("Sending request");
        self.inner.init(network, ()).await
    }

    #[instrument(skip(self, wallet))]
    pub async fn create_wallet(
        &self,
        network: Network,
        wallet: Wallet,
    ) -> Result<String, StoreError> {
        debug!(wallet_id = %wallet.id, "Sending request");
        self.inner.insert(network, wallet).await
    }

    #[instrument(skip(self))]
    pub async fn set_balance(
        &self,
        network: Network,
        wallet_id: String,
        balance: f64,
    ) -> Result<Wallet, StoreError> {
        debug!("Sending request");
        self.inner
            .patch(network, wallet_id, WalletPatch { balance: Some(balance) })
            .await
    }
}

#[async_trait]
impl StoreHandle<Wallet> for WalletStoreClient {
    fn inner(&self) -> &StoreClient<Wallet> {
        &self.inner
    }
}
