use crate::api::{ApiClientRegistry, ApiConfig, ShopGateway, UserGateway};
use crate::diag::DiagnosticLog;
use crate::identity::{Ed25519Keygen, IdentityProvider};
use crate::lifecycle::BootstrapSequencer;
use crate::model::Network;
use crate::progress::ProgressSignal;
use crate::shop::OrderLifecycleManager;
use crate::stores::{
    account_store, card_store, gift_card_store, wallet_store, AccountStoreClient, CardStoreClient,
    GiftCardStoreClient, WalletStoreClient,
};
use std::sync::Arc;
use tracing::{error, info};

/// The main runtime composition root for the wallet's effect layer.
///
/// `WalletSystem` is responsible for:
/// - **Lifecycle Management**: Spawning and stopping the feature-store actors
/// - **Dependency Wiring**: Connecting the sequencer and order manager to
///   the identity provider, API registry, stores, and diagnostic log
/// - **Resource Coordination**: Sharing one progress signal and one log trail
///
/// # Example
///
/// ```ignore
/// let system = WalletSystem::new(ApiConfig::default());
///
/// let outcome = system.bootstrap().run(Network::Mainnet, token.as_ref()).await;
///
/// let manager = system.order_manager(Network::Mainnet).expect("bootstrapped");
/// let order = manager.create_invoice(&card_config, params, &purchaser).await?;
///
/// system.shutdown().await?;
/// ```
pub struct WalletSystem {
    /// Client for the wallet store
    pub wallets: WalletStoreClient,

    /// Client for the linked-account store
    pub account: AccountStoreClient,

    /// Client for the entitlement-card store
    pub cards: CardStoreClient,

    /// Client for the gift-card order store
    pub gift_cards: GiftCardStoreClient,

    /// Per-network app identities
    pub identity: Arc<IdentityProvider>,

    /// Per-network configured API clients
    pub api: Arc<ApiClientRegistry>,

    /// The clearable diagnostic log trail
    pub diag: DiagnosticLog,

    /// The shared progress indicator signal
    pub progress: Arc<ProgressSignal>,

    bootstrap: BootstrapSequencer,

    /// Task handles for all running store actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl WalletSystem {
    /// Creates and initializes a new `WalletSystem` with all store actors
    /// running.
    pub fn new(config: ApiConfig) -> Self {
        let diag = DiagnosticLog::new();

        // 1. Spawn the feature stores (no dependencies between them)
        let (wallet_actor, wallets) = wallet_store::new();
        let (account_actor, account) = account_store::new();
        let (card_actor, cards) = card_store::new();
        let (gift_card_actor, gift_cards) = gift_card_store::new();

        let handles = vec![
            tokio::spawn(wallet_actor.run()),
            tokio::spawn(account_actor.run()),
            tokio::spawn(card_actor.run()),
            tokio::spawn(gift_card_actor.run()),
        ];

        // 2. Shared components
        let identity = Arc::new(IdentityProvider::new(Arc::new(Ed25519Keygen), diag.clone()));
        let api = Arc::new(ApiClientRegistry::new(config));
        let progress = Arc::new(ProgressSignal::new());

        // 3. Wire the sequencer; the registry doubles as the user gateway
        let bootstrap = BootstrapSequencer::new(
            identity.clone(),
            api.clone(),
            api.clone() as Arc<dyn UserGateway>,
            wallets.clone(),
            account.clone(),
            cards.clone(),
            diag.clone(),
        );

        Self {
            wallets,
            account,
            cards,
            gift_cards,
            identity,
            api,
            diag,
            progress,
            bootstrap,
            handles,
        }
    }

    /// The bootstrap sequencer wired to this system.
    pub fn bootstrap(&self) -> &BootstrapSequencer {
        &self.bootstrap
    }

    /// An order lifecycle manager bound to the network's configured REST
    /// client. `None` until the network has been bootstrapped (4.2).
    pub fn order_manager(&self, network: Network) -> Option<OrderLifecycleManager> {
        let handles = self.api.clients(network)?;
        Some(OrderLifecycleManager::new(
            network,
            handles.rest.clone() as Arc<dyn ShopGateway>,
            self.gift_cards.clone(),
        ))
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Drops every client this system owns (the sequencer included), which
    /// closes the store channels; each actor drains its queue and exits.
    /// Any order managers or client clones still held elsewhere keep their
    /// store alive until they are dropped too.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.bootstrap);
        drop(self.wallets);
        drop(self.account);
        drop(self.cards);
        drop(self.gift_cards);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for WalletSystem {
    fn default() -> Self {
        Self::new(ApiConfig::default())
    }
}
