use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{multipart::Form, Client, Url};
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::api::errors::ApiError;
use crate::config::ApiConfig;
use crate::observability::api_metrics;

/// Rate-limited HTTP client for the orphanage REST API
#[derive(Debug, Clone)]
pub struct RateLimitedHttpClient {
    http: Client,
    base_url: Url,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
}

impl RateLimitedHttpClient {
    pub fn new(settings: &ApiConfig) -> Result<Self, ApiError> {
        let per_second =
            NonZeroU32::new(settings.rate_limit.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(settings.rate_limit.burst_capacity).unwrap_or(per_second);
        let quota = Quota::per_second(per_second).allow_burst(burst);
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(ApiError::Build)?;

        Ok(Self {
            http,
            base_url: parse_base_url(&settings.base_url)?,
            rate_limiter,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path relative to the base URL, keeping any base path prefix
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{path}: {e}")))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        self.rate_limiter.until_ready().await;
        api_metrics().record_request();
        debug!(%url, "GET");

        let result = async {
            let response = self.http.get(url.clone()).send().await?;
            ensure_success(response.status(), &url)?;
            Ok::<T, ApiError>(response.json::<T>().await?)
        }
        .await;

        if result.is_err() {
            api_metrics().record_error();
        }
        result
    }

    /// POST a multipart form, discarding the response body
    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<(), ApiError> {
        let url = self.endpoint(path)?;
        self.rate_limiter.until_ready().await;
        api_metrics().record_request();
        debug!(%url, "POST multipart");

        let result = async {
            let response = self.http.post(url.clone()).multipart(form).send().await?;
            ensure_success(response.status(), &url)
        }
        .await;

        if result.is_err() {
            api_metrics().record_error();
        }
        result
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    let url = Url::parse(&normalized).map_err(|e| ApiError::InvalidBaseUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(url)
}

fn ensure_success(status: reqwest::StatusCode, url: &Url) -> Result<(), ApiError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}
