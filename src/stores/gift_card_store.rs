//! Gift-card order store, keyed by invoice id.
//!
//! This shelf is the local record of paid-for entitlements: an order is
//! inserted at `UNREDEEMED` the moment invoice creation succeeds, and
//! every redemption attempt — successful or classified — lands here as a
//! patch. Losing this record would lose the user's purchase, which is why
//! the order manager persists before and after talking to the redemption
//! endpoint.

use crate::framework::{StoreActor, StoreClient, StoreEntity, StoreError};
use crate::model::{GiftCardOrder, Network, RedemptionReceipt};
use crate::stores::StoreHandle;
use async_trait::async_trait;
use tracing::{debug, instrument};

impl StoreEntity for GiftCardOrder {
    type Key = String;
    type Seed = Vec<GiftCardOrder>;
    type Patch = RedemptionReceipt;

    fn key(&self) -> String {
        self.invoice_id.clone()
    }

    fn from_seed(seed: Vec<GiftCardOrder>) -> Vec<Self> {
        seed
    }

    fn apply(&mut self, patch: RedemptionReceipt) -> Result<(), String> {
        self.apply_receipt(patch);
        Ok(())
    }
}

/// Creates a new gift-card store actor and its client.
pub fn new() -> (StoreActor<GiftCardOrder>, GiftCardStoreClient) {
    let (actor, generic_client) = StoreActor::new(32);
    (actor, GiftCardStoreClient::new(generic_client))
}

/// Client for the gift-card order store.
#[derive(Clone)]
pub struct GiftCardStoreClient {
    inner: StoreClient<GiftCardOrder>,
}

impl GiftCardStoreClient {
    pub fn new(inner: StoreClient<GiftCardOrder>) -> Self {
        Self { inner }
    }

    /// Persist a freshly created order.
    #[instrument(skip(self, order))]
    pub async fn insert_unredeemed(
        &self,
        network: Network,
        order: GiftCardOrder,
    ) -> Result<String, StoreError> {
        debug!(invoice_id = %order.invoice_id, "Sending request");
        self.inner.insert(network, order).await
    }

    /// Look up an order by invoice id.
    #[instrument(skip(self))]
    pub async fn find(
        &self,
        network: Network,
        invoice_id: &str,
    ) -> Result<Option<GiftCardOrder>, StoreError> {
        debug!("Sending request");
        self.inner.get(network, invoice_id.to_string()).await
    }

    /// Merge a redemption receipt into the stored order.
    #[instrument(skip(self, receipt))]
    pub async fn apply_redemption(
        &self,
        network: Network,
        invoice_id: &str,
        receipt: RedemptionReceipt,
    ) -> Result<GiftCardOrder, StoreError> {
        debug!(status = ?receipt.status, "Sending request");
        self.inner
            .patch(network, invoice_id.to_string(), receipt)
            .await
    }
}

#[async_trait]
impl StoreHandle<GiftCardOrder> for GiftCardStoreClient {
    fn inner(&self) -> &StoreClient<GiftCardOrder> {
        &self.inner
    }
}
