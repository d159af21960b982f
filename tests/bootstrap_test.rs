use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use vela_wallet_core::api::{ApiClientRegistry, ApiConfig, ApiError, UserGateway};
use vela_wallet_core::diag::{DiagnosticLog, LogLevel};
use vela_wallet_core::framework::mock::{raw_client, MockStoreClient};
use vela_wallet_core::identity::{Ed25519Keygen, IdentityError, IdentityKeygen, IdentityProvider};
use vela_wallet_core::lifecycle::{BootstrapSequencer, WalletSystem};
use vela_wallet_core::model::{
    AppIdentity, BootstrapOutcome, Card, CardBalance, LocalSettings, Network, SessionToken,
    UserProfile, UserSnapshot,
};
use vela_wallet_core::stores::{
    account_store, card_store, wallet_store, AccountStoreClient, CardStoreClient, StoreHandle,
    WalletStoreClient,
};

/// Scripted user-data gateway. Panics on an unexpected fetch, which is
/// how the unpaired test asserts the fetch never happens.
struct FakeUserGateway {
    responses: Mutex<VecDeque<Result<UserSnapshot, ApiError>>>,
}

impl FakeUserGateway {
    fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
        }
    }

    fn push(&self, response: Result<UserSnapshot, ApiError>) {
        self.responses.lock().unwrap().push_back(response);
    }
}

#[async_trait]
impl UserGateway for FakeUserGateway {
    async fn fetch_all_user_data(
        &self,
        _network: Network,
        _token: &SessionToken,
    ) -> Result<UserSnapshot, ApiError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected user-data fetch")
    }
}

struct FailingKeygen;

impl IdentityKeygen for FailingKeygen {
    fn generate(&self, _network: Network) -> Result<AppIdentity, IdentityError> {
        Err(IdentityError::GenerationFailed("no entropy".to_string()))
    }
}

fn snapshot() -> UserSnapshot {
    UserSnapshot {
        basic_info: UserProfile {
            eid: Some("e_1".to_string()),
            email: Some("kai@example.com".to_string()),
            local_settings: LocalSettings {
                sync_gift_card_purchases: true,
            },
            ..UserProfile::default()
        },
        cards: vec![Card {
            id: "c_1".to_string(),
            currency: "USD".to_string(),
            last_four_digits: Some("4242".to_string()),
            card_type: None,
            balance: None,
        }],
        card_balances: vec![CardBalance {
            id: "c_1".to_string(),
            balance: 75.0,
        }],
    }
}

struct Harness {
    sequencer: BootstrapSequencer,
    user_gateway: Arc<FakeUserGateway>,
    api: Arc<ApiClientRegistry>,
    diag: DiagnosticLog,
    wallets: WalletStoreClient,
    account: AccountStoreClient,
    cards: CardStoreClient,
}

/// A sequencer over real store actors and a scripted user gateway.
fn harness_with(identity: Arc<IdentityProvider>, diag: DiagnosticLog) -> Harness {
    let (wallet_actor, wallets) = wallet_store::new();
    let (account_actor, account) = account_store::new();
    let (card_actor, cards) = card_store::new();
    tokio::spawn(wallet_actor.run());
    tokio::spawn(account_actor.run());
    tokio::spawn(card_actor.run());

    let api = Arc::new(ApiClientRegistry::new(ApiConfig::default()));
    let user_gateway = Arc::new(FakeUserGateway::new());

    let sequencer = BootstrapSequencer::new(
        identity,
        api.clone(),
        user_gateway.clone(),
        wallets.clone(),
        account.clone(),
        cards.clone(),
        diag.clone(),
    );

    Harness {
        sequencer,
        user_gateway,
        api,
        diag,
        wallets,
        account,
        cards,
    }
}

fn harness() -> Harness {
    let diag = DiagnosticLog::new();
    let identity = Arc::new(IdentityProvider::new(Arc::new(Ed25519Keygen), diag.clone()));
    harness_with(identity, diag)
}

#[tokio::test(start_paused = true)]
async fn test_paired_bootstrap_seeds_all_stores() {
    let h = harness();
    h.user_gateway.push(Ok(snapshot()));

    let mut outcome_rx = h.sequencer.outcome();
    let token = SessionToken::new("tok_1");
    let outcome = h.sequencer.run(Network::Mainnet, Some(&token)).await;
    assert_eq!(outcome, BootstrapOutcome::Succeeded);
    assert_eq!(*outcome_rx.borrow_and_update(), BootstrapOutcome::Succeeded);

    // API clients are configured for the network
    assert!(h.api.clients(Network::Mainnet).is_some());

    // Profile slice landed in the account store
    let profile = h.account.profile(Network::Mainnet).await.unwrap().unwrap();
    assert_eq!(profile.email.as_deref(), Some("kai@example.com"));

    // Card slice landed with its balance merged in
    let cards = h.cards.list(Network::Mainnet).await.unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].balance, Some(75.0));

    // Wallet shelf exists and starts empty
    assert!(h.wallets.list(Network::Mainnet).await.unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_user_data_failure_does_not_abort_bootstrap() {
    let h = harness();
    h.user_gateway.push(Err(ApiError::Http {
        url: "https://vela.cash/graphql".to_string(),
        status: 503,
        body: r#"{"message":"upstream unavailable"}"#.to_string(),
    }));

    let token = SessionToken::new("tok_1");
    let outcome = h.sequencer.run(Network::Mainnet, Some(&token)).await;
    assert_eq!(outcome, BootstrapOutcome::Succeeded);

    // Stores initialized empty
    assert!(h.account.profile(Network::Mainnet).await.unwrap().is_none());
    assert!(h.cards.list(Network::Mainnet).await.unwrap().is_empty());

    // The transport error was logged with its URL for diagnostics
    let entries = h.diag.entries();
    let transport_error = entries
        .iter()
        .find(|e| e.level == LogLevel::Error)
        .expect("transport error entry");
    let context = transport_error.context.as_ref().expect("structured context");
    assert_eq!(context["url"], "https://vela.cash/graphql");
}

#[tokio::test(start_paused = true)]
async fn test_unpaired_bootstrap_skips_the_fetch() {
    let h = harness();
    // No scripted responses: a fetch would panic the test.

    let outcome = h.sequencer.run(Network::Mainnet, None).await;
    assert_eq!(outcome, BootstrapOutcome::Succeeded);
    assert!(h.account.profile(Network::Mainnet).await.unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_subsystem_failure_fails_bootstrap_and_halts_later_stages() {
    let diag = DiagnosticLog::new();
    let identity = Arc::new(IdentityProvider::new(Arc::new(Ed25519Keygen), diag.clone()));

    // Wallets: real actor. Account: dead store (its init fails).
    // Cards: mock with zero expectations — any call would fail the test.
    let (wallet_actor, wallets) = wallet_store::new();
    tokio::spawn(wallet_actor.run());
    let (account_client, account_receiver) = raw_client(8);
    drop(account_receiver);
    let account = AccountStoreClient::new(account_client);
    let card_mock = MockStoreClient::new();
    let cards = CardStoreClient::new(card_mock.client());

    let api = Arc::new(ApiClientRegistry::new(ApiConfig::default()));
    let sequencer = BootstrapSequencer::new(
        identity,
        api,
        Arc::new(FakeUserGateway::new()),
        wallets,
        account,
        cards,
        diag.clone(),
    );

    let outcome = sequencer.run(Network::Mainnet, None).await;
    assert_eq!(outcome, BootstrapOutcome::Failed);

    // The card stage never ran
    card_mock.verify();

    // Failure was recorded with a serialized error form
    let entries = diag.entries();
    assert!(entries
        .iter()
        .any(|e| e.level == LogLevel::Error && e.context.is_some()));
}

#[tokio::test(start_paused = true)]
async fn test_identity_failure_halts_before_api_configuration() {
    let diag = DiagnosticLog::new();
    let identity = Arc::new(IdentityProvider::new(Arc::new(FailingKeygen), diag.clone()));
    let h = harness_with(identity, diag);

    let outcome = h.sequencer.run(Network::Mainnet, None).await;
    assert_eq!(outcome, BootstrapOutcome::Failed);

    // Nothing downstream happened
    assert!(h.api.clients(Network::Mainnet).is_none());
    assert!(h.wallets.list(Network::Mainnet).await.unwrap().is_empty());
}

/// A fresh run resets the outcome before sequencing, so observers see the
/// Pending edge of every attempt.
#[tokio::test(start_paused = true)]
async fn test_outcome_resets_between_attempts() {
    let h = harness();

    let outcome = h.sequencer.run(Network::Mainnet, None).await;
    assert_eq!(outcome, BootstrapOutcome::Succeeded);

    let mut rx = h.sequencer.outcome();
    rx.borrow_and_update();

    let run = h.sequencer.run(Network::Mainnet, None);
    tokio::pin!(run);

    // The first observable edge of the second attempt is Pending
    tokio::select! {
        biased;
        _ = rx.changed() => {}
        _ = &mut run => panic!("run finished before Pending was observable"),
    }
    assert_eq!(*rx.borrow_and_update(), BootstrapOutcome::Pending);

    assert_eq!(run.await, BootstrapOutcome::Succeeded);
}

/// Smoke test for the composition root: everything wired by
/// `WalletSystem` comes up and shuts down cleanly. (The user-data path is
/// exercised against fakes above; an unpaired run needs no network.)
#[tokio::test(start_paused = true)]
async fn test_wallet_system_end_to_end_unpaired() {
    let system = WalletSystem::new(ApiConfig::default());

    let outcome = system.bootstrap().run(Network::Testnet, None).await;
    assert_eq!(outcome, BootstrapOutcome::Succeeded);

    // Bootstrapped network hands out an order manager; others do not
    assert!(system.order_manager(Network::Testnet).is_some());
    assert!(system.order_manager(Network::Mainnet).is_none());

    system.shutdown().await.expect("clean shutdown");
}
