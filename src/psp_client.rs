use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::BuckarooConfig;
use crate::errors::GatewayError;
use crate::signature::HmacSigner;

const TRANSACTION_SLUG: &str = "json/transaction";
const DATA_REQUEST_SLUG: &str = "json/datarequest";

/// Signed HTTP transport to the payment service provider.
///
/// One logical call maps to exactly one outbound POST; retry, circuit-breaking
/// and backoff are a caller concern.
#[derive(Clone)]
pub struct PspClient {
    client: reqwest::Client,
    base_url: String,
    signer: HmacSigner,
}

impl PspClient {
    /// Creates a new `PspClient` from validated configuration.
    pub fn new(config: &BuckarooConfig) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert("culture", HeaderValue::from_static("nl-NL"));
        headers.insert("channel", HeaderValue::from_static("Web"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()
            .map_err(|e| {
                GatewayError::Transport(format!("Failed to create PSP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            signer: HmacSigner::new(&config.website_key, &config.private_key),
        })
    }

    /// Posts a state-changing request to the transaction endpoint.
    pub async fn post_transaction<R, T>(&self, request: &R) -> Result<T, GatewayError>
    where
        R: Serialize,
        T: DeserializeOwned,
    {
        self.post_request(request, TRANSACTION_SLUG).await
    }

    /// Posts a read-only lookup to the data-request endpoint.
    pub async fn post_data_request<R, T>(&self, request: &R) -> Result<T, GatewayError>
    where
        R: Serialize,
        T: DeserializeOwned,
    {
        self.post_request(request, DATA_REQUEST_SLUG).await
    }

    async fn post_request<R, T>(&self, request: &R, slug: &str) -> Result<T, GatewayError>
    where
        R: Serialize,
        T: DeserializeOwned,
    {
        let url = Url::parse(&format!("{}{}", self.base_url, slug)).map_err(|e| {
            GatewayError::Transport(format!("Invalid PSP endpoint URL: {}", e))
        })?;

        // The signature covers the exact bytes on the wire, so serialize once
        // and send that same buffer.
        let body = serde_json::to_vec(request).map_err(|e| {
            GatewayError::Transport(format!("Failed to serialize PSP request: {}", e))
        })?;
        let authorization = self
            .signer
            .authorization_header(&Method::POST, &url, Some(&body));

        tracing::debug!("Posting signed request to {}", slug);

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(format!("PSP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("PSP {} returned {}: {}", slug, status, error_text);
            return Err(GatewayError::Transport(format!(
                "PSP returned {}: {}",
                status, error_text
            )));
        }

        response.json().await.map_err(|e| {
            tracing::error!("Failed to parse PSP {} response: {}", slug, e);
            GatewayError::Transport(format!("Failed to parse PSP response: {}", e))
        })
    }
}
