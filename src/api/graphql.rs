//! GraphQL client for the account backend.

use crate::api::config::ApiConfig;
use crate::api::ApiError;
use crate::identity;
use crate::model::{AppIdentity, Network, SessionToken, UserSnapshot};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use ed25519_dalek::Signer;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

const ALL_USER_DATA_QUERY: &str = "\
query AllUserData($token: String!) {
  user(token: $token) {
    basicInfo {
      eid
      email
      givenName
      familyName
      incentiveLevelId
      localSettings { syncGiftCardPurchases }
    }
    cards { id currency lastFourDigits cardType }
    cardBalances { id balance }
  }
}";

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct GraphQlResponse<T> {
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct UserDataEnvelope {
    user: UserSnapshot,
}

/// GraphQL client bound to one network and one app identity.
pub struct GraphQlApi {
    http: reqwest::Client,
    endpoint: String,
    identity: AppIdentity,
}

impl GraphQlApi {
    pub fn new(
        config: &ApiConfig,
        network: Network,
        identity: AppIdentity,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        let endpoint = format!("{}/graphql", config.base_url(network).trim_end_matches('/'));
        debug!(%network, endpoint, "GraphQL client configured");
        Ok(Self {
            http,
            endpoint,
            identity,
        })
    }

    /// Run one signed query and unwrap the GraphQL envelope.
    pub async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, ApiError> {
        let payload = serde_json::json!({ "query": query, "variables": variables });
        let body = serde_json::to_string(&payload)?;

        let key = identity::signing_key(&self.identity)?;
        let signature = BASE64.encode(
            key.sign(format!("{}{}", self.endpoint, body).as_bytes())
                .to_bytes(),
        );

        let response = self
            .http
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .header("x-identity", &self.identity.public_id)
            .header("x-signature", signature)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Http {
                url: self.endpoint.clone(),
                status: status.as_u16(),
                body: text,
            });
        }

        let envelope: GraphQlResponse<T> = serde_json::from_str(&text)?;
        if let Some(errors) = envelope.errors {
            let joined = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ApiError::Rpc(joined));
        }
        envelope
            .data
            .ok_or_else(|| ApiError::Rpc("empty response envelope".to_string()))
    }
}

impl GraphQlApi {
    /// The profile, cards, and card balances in one round trip.
    pub async fn fetch_all_user_data(&self, token: &SessionToken) -> Result<UserSnapshot, ApiError> {
        let variables = serde_json::json!({ "token": token.as_str() });
        let envelope: UserDataEnvelope = self.query(ALL_USER_DATA_QUERY, variables).await?;
        Ok(envelope.user)
    }
}
