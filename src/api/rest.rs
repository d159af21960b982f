//! REST client for the payment backend.
//!
//! Two request styles share this client: plain JSON endpoints (public
//! payment, invoice lookup, redemption, catalog) and the privileged RPC
//! envelope, which carries the session token in-band and is signed with
//! the app identity.

use crate::api::config::ApiConfig;
use crate::api::gateway::ShopGateway;
use crate::api::ApiError;
use crate::identity;
use crate::model::{
    AppIdentity, CardConfig, Invoice, InvoiceRequest, Network, OrderDescriptor,
    RedemptionReceipt, RedemptionRequest, SessionToken,
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use ed25519_dalek::Signer;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// `{ data: T }` wrapper some endpoints put around their payload.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// Privileged RPC response: either `data` or an in-band `error`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct RpcEnvelope<T> {
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

/// Privileged RPC request envelope.
#[derive(Debug, Serialize)]
struct RpcCall<'a> {
    method: &'a str,
    token: &'a str,
    params: &'a serde_json::Value,
}

/// REST client bound to one network and one app identity.
pub struct RestApi {
    http: reqwest::Client,
    base_url: String,
    network: Network,
    identity: AppIdentity,
}

impl RestApi {
    pub fn new(
        config: &ApiConfig,
        network: Network,
        identity: AppIdentity,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        let base_url = config.base_url(network).trim_end_matches('/').to_string();
        debug!(%network, base_url, "REST client configured");
        Ok(Self {
            http,
            base_url,
            network,
            identity,
        })
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn identity(&self) -> &AppIdentity {
        &self.identity
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self.http.get(&url).send().await?;
        Self::decode(url, response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self.http.post(&url).json(body).send().await?;
        Self::decode(url, response).await
    }

    async fn decode<T: DeserializeOwned>(
        url: String,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Http {
                url,
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Privileged RPC call. The whole request (URL plus body) is signed
    /// with the app identity so the backend can pin the installation.
    pub async fn rpc<T: DeserializeOwned>(
        &self,
        method: &str,
        token: &SessionToken,
        params: serde_json::Value,
    ) -> Result<T, ApiError> {
        let url = self.url("/api/v2");
        let call = RpcCall {
            method,
            token: token.as_str(),
            params: &params,
        };
        let body = serde_json::to_string(&call)?;

        let key = identity::signing_key(&self.identity)?;
        let signature = BASE64.encode(key.sign(format!("{}{}", url, body).as_bytes()).to_bytes());

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .header("x-identity", &self.identity.public_id)
            .header("x-signature", signature)
            .body(body)
            .send()
            .await?;

        let envelope: RpcEnvelope<T> = Self::decode(url, response).await?;
        if let Some(error) = envelope.error {
            return Err(ApiError::Rpc(error));
        }
        envelope
            .data
            .ok_or_else(|| ApiError::Rpc("empty response envelope".to_string()))
    }
}

#[async_trait]
impl ShopGateway for RestApi {
    async fn create_invoice_paired(
        &self,
        token: &SessionToken,
        request: &InvoiceRequest,
    ) -> Result<OrderDescriptor, ApiError> {
        let params = serde_json::to_value(request)?;
        self.rpc("createGiftCardInvoice", token, params).await
    }

    async fn create_invoice_public(
        &self,
        request: &InvoiceRequest,
    ) -> Result<OrderDescriptor, ApiError> {
        self.post_json("/gift-cards/pay", request).await
    }

    async fn fetch_invoice(&self, invoice_id: &str) -> Result<Invoice, ApiError> {
        let envelope: DataEnvelope<Invoice> =
            self.get_json(&format!("/invoices/{}", invoice_id)).await?;
        Ok(envelope.data)
    }

    async fn redeem_gift_card(
        &self,
        request: &RedemptionRequest,
    ) -> Result<RedemptionReceipt, ApiError> {
        self.post_json("/gift-cards/redeem", request).await
    }

    async fn fetch_available_cards(
        &self,
        country: &str,
        incentive_level_id: Option<&str>,
    ) -> Result<HashMap<String, Vec<CardConfig>>, ApiError> {
        let path = match incentive_level_id {
            Some(level) => format!("/gift-cards/catalog/{}/{}", country, level),
            None => format!("/gift-cards/catalog/{}", country),
        };
        self.get_json(&path).await
    }

    async fn fetch_directory(&self) -> Result<serde_json::Value, ApiError> {
        self.get_json("/merchant-directory/directory").await
    }

    async fn fetch_integrations(&self) -> Result<serde_json::Value, ApiError> {
        self.get_json("/merchant-directory/integrations").await
    }
}
