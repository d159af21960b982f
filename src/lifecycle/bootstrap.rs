//! The application bootstrap pipeline.
//!
//! One linear pass per attempt: acquire identity, configure API clients,
//! refresh user data if paired (best-effort), initialize the feature
//! stores in order, then signal the outcome. There is no retry loop —
//! a new attempt means a new [`BootstrapSequencer::run`] call, typically
//! an app relaunch.

use crate::api::{ApiClientRegistry, ApiError, UserGateway};
use crate::diag::DiagnosticLog;
use crate::identity::IdentityProvider;
use crate::lifecycle::BootstrapError;
use crate::model::{BootstrapOutcome, Network, SessionToken, UserSnapshot};
use crate::stores::{AccountStoreClient, CardSeed, CardStoreClient, WalletStoreClient};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::instrument;

/// Settle pause before declaring success, inherited from the animated UI
/// this layer drives.
const POST_INIT_SETTLE: Duration = Duration::from_millis(500);

/// Drives the bootstrap state machine: `Pending -> Succeeded | Failed`.
pub struct BootstrapSequencer {
    identity: Arc<IdentityProvider>,
    api: Arc<ApiClientRegistry>,
    user_gateway: Arc<dyn UserGateway>,
    wallets: WalletStoreClient,
    account: AccountStoreClient,
    cards: CardStoreClient,
    diag: DiagnosticLog,
    outcome: watch::Sender<BootstrapOutcome>,
}

impl BootstrapSequencer {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        identity: Arc<IdentityProvider>,
        api: Arc<ApiClientRegistry>,
        user_gateway: Arc<dyn UserGateway>,
        wallets: WalletStoreClient,
        account: AccountStoreClient,
        cards: CardStoreClient,
        diag: DiagnosticLog,
    ) -> Self {
        let (outcome, _rx) = watch::channel(BootstrapOutcome::Pending);
        Self {
            identity,
            api,
            user_gateway,
            wallets,
            account,
            cards,
            diag,
            outcome,
        }
    }

    /// Observe outcome changes (for UI consumption).
    pub fn outcome(&self) -> watch::Receiver<BootstrapOutcome> {
        self.outcome.subscribe()
    }

    /// Run one bootstrap attempt.
    ///
    /// `token` is the network's session token, if the user has paired —
    /// the caller reads it from the token store; this layer never touches
    /// ambient session state.
    #[instrument(skip(self, token), fields(paired = token.is_some()))]
    pub async fn run(&self, network: Network, token: Option<&SessionToken>) -> BootstrapOutcome {
        self.outcome.send_replace(BootstrapOutcome::Pending);
        self.diag.clear();
        self.diag.info("Initializing app...");

        let outcome = match self.run_pipeline(network, token).await {
            Ok(()) => {
                self.diag.info("Initialized app successfully.");
                BootstrapOutcome::Succeeded
            }
            Err(err) => {
                self.diag.error("Failed to initialize app.");
                self.diag.error_with(
                    err.to_string(),
                    serde_json::json!({ "error": format!("{:?}", err) }),
                );
                BootstrapOutcome::Failed
            }
        };

        self.outcome.send_replace(outcome);
        outcome
    }

    async fn run_pipeline(
        &self,
        network: Network,
        token: Option<&SessionToken>,
    ) -> Result<(), BootstrapError> {
        let identity = self
            .identity
            .ensure_identity(network)
            .ok_or(BootstrapError::IdentityUnavailable(network))?;

        self.api.configure(network, &identity)?;

        let snapshot = match token {
            Some(token) => self.refresh_user_data(network, token).await,
            None => None,
        };

        self.init_subsystems(network, snapshot).await?;

        sleep(POST_INIT_SETTLE).await;
        Ok(())
    }

    /// Best-effort boundary: any error is logged and absorbed, and the
    /// pipeline proceeds with an empty snapshot.
    async fn refresh_user_data(
        &self,
        network: Network,
        token: &SessionToken,
    ) -> Option<UserSnapshot> {
        self.diag
            .info("Session is paired, refreshing user data...");

        match self.user_gateway.fetch_all_user_data(network, token).await {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                match &err {
                    ApiError::Http { url, status, body } => {
                        self.diag.error_with(
                            format!("Transport error: HTTP {}", status),
                            serde_json::json!({ "url": url, "body": body }),
                        );
                    }
                    other => {
                        self.diag.error(format!("User data fetch failed: {}", other));
                    }
                }
                self.diag
                    .info("Failed to refresh user data. Continuing initialization.");
                None
            }
        }
    }

    /// Ordered feature-store initialization. Later stages may assume
    /// earlier stages completed; a failure propagates and no later stage
    /// runs.
    async fn init_subsystems(
        &self,
        network: Network,
        snapshot: Option<UserSnapshot>,
    ) -> Result<(), BootstrapError> {
        let (profile, cards, balances) = match snapshot {
            Some(snapshot) => (
                Some(snapshot.basic_info),
                snapshot.cards,
                snapshot.card_balances,
            ),
            None => (None, Vec::new(), Vec::new()),
        };

        self.wallets.init(network).await?;
        self.account.init(network, profile).await?;
        self.cards
            .init(network, CardSeed { cards, balances })
            .await?;
        Ok(())
    }
}
