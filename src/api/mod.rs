//! API clients and their per-network registry.
//!
//! [`ApiClientRegistry`] is the prerequisite for every network call: it
//! binds a [`RestApi`] and a [`GraphQlApi`] to `(network, identity)`.
//! Orchestrators reach the transport through the [`gateway`] traits so
//! tests can swap in fakes.

pub mod config;
pub mod error;
pub mod gateway;
pub mod graphql;
pub mod rest;

pub use config::ApiConfig;
pub use error::ApiError;
pub use gateway::{ShopGateway, UserGateway};
pub use graphql::GraphQlApi;
pub use rest::RestApi;

use crate::model::{AppIdentity, Network, SessionToken, UserSnapshot};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::info;

/// The configured client pair for one network.
#[derive(Clone)]
pub struct ApiHandles {
    pub rest: Arc<RestApi>,
    pub graphql: Arc<GraphQlApi>,
}

/// Binds configured API clients to the active network and identity.
///
/// `configure` may be called again — on relaunch, or after an identity
/// replacement — and simply overwrites the prior pair. Configuring twice
/// with identical arguments yields an equivalent registry.
pub struct ApiClientRegistry {
    config: ApiConfig,
    clients: Mutex<HashMap<Network, ApiHandles>>,
}

impl ApiClientRegistry {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Build and store the REST and GraphQL clients for a network.
    pub fn configure(&self, network: Network, identity: &AppIdentity) -> Result<(), ApiError> {
        let rest = RestApi::new(&self.config, network, identity.clone())?;
        let graphql = GraphQlApi::new(&self.config, network, identity.clone())?;
        self.clients.lock().unwrap().insert(
            network,
            ApiHandles {
                rest: Arc::new(rest),
                graphql: Arc::new(graphql),
            },
        );
        info!(%network, "API clients configured");
        Ok(())
    }

    /// The configured clients for a network, if any.
    pub fn clients(&self, network: Network) -> Option<ApiHandles> {
        self.clients.lock().unwrap().get(&network).cloned()
    }
}

#[async_trait]
impl UserGateway for ApiClientRegistry {
    async fn fetch_all_user_data(
        &self,
        network: Network,
        token: &SessionToken,
    ) -> Result<UserSnapshot, ApiError> {
        let handles = self
            .clients(network)
            .ok_or(ApiError::NotConfigured(network))?;
        handles.graphql.fetch_all_user_data(token).await
    }
}
