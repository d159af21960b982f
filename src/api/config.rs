//! API client configuration.

use crate::model::Network;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Base URLs and transport settings for the backend APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiConfig {
    pub mainnet_url: String,
    pub testnet_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            mainnet_url: "https://vela.cash".to_string(),
            testnet_url: "https://test.vela.cash".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn base_url(&self, network: Network) -> &str {
        match network {
            Network::Mainnet => &self.mainnet_url,
            Network::Testnet => &self.testnet_url,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_per_network() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url(Network::Mainnet), "https://vela.cash");
        assert_eq!(config.base_url(Network::Testnet), "https://test.vela.cash");
    }
}
