//! REST API client for the remote storefront services.
//!
//! One client covers the three consumed contracts: identity
//! (`/auth/*`), catalog (`/products`, `/categories`), and orders
//! (`/orders`). Requests attach the persisted bearer token when one is
//! present, except for signin/signup which are anonymous by definition.
//!
//! Catalog reads are cached in-process via `moka` (5-minute TTL).

mod auth;
mod cache;
mod catalog;
mod orders;

pub use catalog::{ProductQuery, SortDirection};

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use shopfront_core::auth::MessageResponse;

use crate::config::ClientConfig;
use crate::storage::{Storage, keys};
use cache::{CacheKey, CacheValue};

/// Errors that can occur when calling the remote services.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service rejected the request.
    #[error("{}", display_service_error(*.status, .message.as_deref()))]
    Service {
        /// HTTP status code.
        status: u16,
        /// `message` field from the response body, if the service sent one.
        message: Option<String>,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response body did not parse.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Client construction failed.
    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

impl ApiError {
    /// The displayable message from the service response, if any.
    ///
    /// Callers surface this verbatim when present and fall back to their
    /// own generic message otherwise.
    #[must_use]
    pub fn service_message(&self) -> Option<&str> {
        match self {
            Self::Service { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

fn display_service_error(status: u16, message: Option<&str>) -> String {
    message.map_or_else(
        || format!("Service error (HTTP {status})"),
        std::borrow::ToOwned::to_owned,
    )
}

/// Client for the storefront REST API.
///
/// Cheaply cloneable via `Arc`; shared by the session manager and any
/// presentation layer.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    storage: Arc<dyn Storage>,
    cache: Cache<CacheKey, CacheValue>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// The bearer token is read from `storage` on every request, so a
    /// login that persists a new token takes effect immediately without
    /// rebuilding the client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Build`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: &ClientConfig, storage: Arc<dyn Storage>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| ApiError::Build(e.to_string()))?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_base_url.as_str().trim_end_matches('/').to_owned(),
                storage,
                cache,
            }),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Current persisted bearer token, if any.
    fn bearer_token(&self) -> Option<String> {
        self.inner.storage.get(keys::TOKEN)
    }

    /// Execute a GET request with the bearer token attached when present.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut request = self.inner.client.get(self.endpoint(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.bearer_token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        self.read_json(path, response).await
    }

    /// Execute a POST request.
    ///
    /// `authenticated` controls bearer attachment; signin/signup are the
    /// only anonymous endpoints.
    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        authenticated: bool,
    ) -> Result<T, ApiError> {
        let mut request = self.inner.client.post(self.endpoint(path)).json(body);
        if authenticated
            && let Some(token) = self.bearer_token()
        {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        self.read_json(path, response).await
    }

    /// Map a response to a typed body, extracting the service's error
    /// message on failure.
    async fn read_json<T: DeserializeOwned>(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        // Read the body as text first for better error diagnostics.
        let body = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_owned()));
        }

        if !status.is_success() {
            let message = serde_json::from_str::<MessageResponse>(&body)
                .ok()
                .map(|m| m.message);
            tracing::warn!(
                path,
                status = status.as_u16(),
                body = %body.chars().take(200).collect::<String>(),
                "Service returned non-success status"
            );
            return Err(ApiError::Service {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_prefers_body_message() {
        let err = ApiError::Service {
            status: 400,
            message: Some("Insufficient stock for product: Walnut Desk".to_owned()),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product: Walnut Desk"
        );
        assert_eq!(
            err.service_message(),
            Some("Insufficient stock for product: Walnut Desk")
        );
    }

    #[test]
    fn test_service_error_generic_fallback() {
        let err = ApiError::Service {
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "Service error (HTTP 500)");
        assert_eq!(err.service_message(), None);
    }

    #[test]
    fn test_not_found_has_no_service_message() {
        let err = ApiError::NotFound("/products/99".to_owned());
        assert_eq!(err.service_message(), None);
    }
}
