//! HTTP client for the FIPE vehicle price-reference API.
//!
//! Only the car listings are used: the brand list and the models of one
//! brand. Every request goes through [`retry_with_backoff`].

use std::time::Duration;

use futures::future::join_all;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::FipeError;
use crate::retry::{retry_after, retry_with_backoff};
use crate::types::{BrandWithModels, FipeReference, ModelsResponse};

const DEFAULT_BASE_URL: &str = "https://parallelum.com.br/fipe/api/v1";
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BACKOFF_BASE_MS: u64 = 500;

/// Client for the FIPE REST API.
///
/// Use [`FipeClient::new`] for production or [`FipeClient::with_base_url`]
/// to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct FipeClient {
    client: Client,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl FipeClient {
    /// Creates a client pointed at the public FIPE mirror.
    ///
    /// # Errors
    ///
    /// Returns [`FipeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, FipeError> {
        Self::with_base_url(timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`FipeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FipeError::InvalidBaseUrl`] if `base_url`
    /// is not an absolute http(s) URL.
    pub fn with_base_url(timeout_secs: u64, base_url: &str) -> Result<Self, FipeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("buscacar/0.1 (price-reference)")
            .build()?;

        // A trailing slash makes the last base segment a directory, so path
        // segments are appended rather than replacing it.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| FipeError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(FipeError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: "URL cannot carry a path".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
        })
    }

    /// Overrides the retry policy. `max_retries = 0` disables retries.
    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Lists every car brand.
    ///
    /// # Errors
    ///
    /// - [`FipeError::Http`] on network failure or non-2xx HTTP status.
    /// - [`FipeError::Deserialize`] if the body is not a brand list.
    pub async fn list_brands(&self) -> Result<Vec<FipeReference>, FipeError> {
        let url = self.endpoint(&["carros", "marcas"]);
        self.get_json(&url).await
    }

    /// Lists the models of the brand with FIPE code `brand_code`.
    ///
    /// # Errors
    ///
    /// - [`FipeError::Http`] on network failure or non-2xx HTTP status.
    /// - [`FipeError::Deserialize`] if the body is not a model listing.
    pub async fn list_models(&self, brand_code: &str) -> Result<Vec<FipeReference>, FipeError> {
        let url = self.endpoint(&["carros", "marcas", brand_code, "modelos"]);
        let response: ModelsResponse = self.get_json(&url).await?;
        Ok(response.modelos)
    }

    /// Lists the first `limit` brands, each with its model names.
    ///
    /// Model listings are fetched concurrently. A brand whose model listing
    /// fails is kept with no models; only a failure of the brand list itself
    /// is an error.
    ///
    /// # Errors
    ///
    /// Returns the error of [`FipeClient::list_brands`].
    pub async fn list_brands_with_models(
        &self,
        limit: usize,
    ) -> Result<Vec<BrandWithModels>, FipeError> {
        let brands: Vec<FipeReference> = self
            .list_brands()
            .await?
            .into_iter()
            .take(limit)
            .collect();

        let fetches = brands.into_iter().map(|brand| async move {
            let models = match self.list_models(&brand.code).await {
                Ok(models) => models,
                Err(e) => {
                    tracing::warn!(
                        brand = %brand.name,
                        code = %brand.code,
                        error = %e,
                        "FIPE model listing failed; serving brand without models"
                    );
                    Vec::new()
                }
            };
            BrandWithModels::new(brand, models)
        });

        let combined = join_all(fetches).await;
        tracing::info!(brands = combined.len(), "fetched FIPE brands with models");
        Ok(combined)
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends a GET request with retries, asserts a 2xx status, and parses the
    /// body as `T`. A 429 becomes [`FipeError::Throttled`].
    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, FipeError> {
        let body = retry_with_backoff(self.max_retries, self.backoff_base_ms, || async {
            let response = self.client.get(url.clone()).send().await?;
            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                return Err(FipeError::Throttled {
                    retry_after: retry_after(response.headers()),
                });
            }
            let response = response.error_for_status()?;
            Ok(response.text().await?)
        })
        .await?;

        serde_json::from_str(&body).map_err(|e| FipeError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
