//! Supplies API REST client.
//!
//! Two read-only endpoints are used:
//! - `GET {api_url}/acceptance/coefficients` - the slot snapshot
//! - `GET {api_url}/warehouses` - the warehouse directory
//!
//! The token goes verbatim into the `Authorization` header. Each request is
//! bounded by the configured timeout; timeouts, transport errors, non-2xx
//! statuses and malformed bodies all become [`FetchError`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{CoefficientDto, WarehouseDto};
use super::settings::ProviderConfig;
use crate::domain::{CoefficientRecord, Warehouse};
use crate::error::FetchError;
use crate::port::outbound::provider::SnapshotFetcher;

/// HTTP client for the supplies API.
pub struct WildberriesClient {
    http: HttpClient,
    base_url: String,
    token: String,
    timeout: Duration,
}

impl WildberriesClient {
    /// Create a client for `base_url` authenticating with `token`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Self {
        let http = HttpClient::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            timeout,
        }
    }

    /// Create a client from provider settings; `token` comes from the environment.
    #[must_use]
    pub fn from_config(config: &ProviderConfig, token: impl Into<String>) -> Self {
        Self::new(
            config.api_url.clone(),
            token,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(url = %url, "Requesting provider data");

        let request = async {
            let response = self
                .http
                .get(&url)
                .header(AUTHORIZATION, &self.token)
                .send()
                .await?
                .error_for_status()?;
            response.json::<T>().await
        };

        // The client timeout already applies; this also bounds body streaming
        // when the client fell back to defaults.
        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result.map_err(FetchError::from),
            Err(_) => Err(FetchError::new(format!(
                "request timed out after {}s",
                self.timeout.as_secs()
            ))),
        }
    }
}

#[async_trait]
impl SnapshotFetcher for WildberriesClient {
    async fn fetch_coefficients(&self) -> Result<Vec<CoefficientRecord>, FetchError> {
        let dtos: Vec<CoefficientDto> = self.get_json("acceptance/coefficients").await?;
        debug!(count = dtos.len(), "Fetched acceptance coefficients");
        Ok(dtos.into_iter().map(CoefficientRecord::from).collect())
    }

    async fn fetch_warehouses(&self) -> Result<Vec<Warehouse>, FetchError> {
        let dtos: Vec<WarehouseDto> = self.get_json("warehouses").await?;
        debug!(count = dtos.len(), "Fetched warehouse directory");
        Ok(dtos.into_iter().map(Warehouse::from).collect())
    }

    fn provider_name(&self) -> &'static str {
        "Wildberries"
    }
}
