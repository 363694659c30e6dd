//! HTTP client for the marketplace service.
//!
//! Thin typed wrapper over the service's REST contract, using `reqwest` for
//! HTTP and `serde_json` for bodies. The client performs no retries and holds
//! no state beyond the connection pool; callers own all domain state.

pub mod types;

use std::sync::Arc;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use marketplace_core::{Email, ProductId, UserId};

use crate::config::ClientConfig;
use types::{
    AccountPayload, CheckoutRequest, LoginBody, NewProduct, Order, Product, RegisterBody,
};

/// Non-success bodies are truncated to this length in error messages.
const ERROR_BODY_LIMIT: usize = 200;

/// Errors that can occur when talking to the marketplace service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {message}")]
    Status {
        /// Response status code.
        status: StatusCode,
        /// Response body, truncated.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the marketplace service.
///
/// Cheaply cloneable; the inner connection pool is shared.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client for the configured service.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_url.clone(),
            }),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.base_url)
    }

    /// Read the response body as text first, so non-success and undecodable
    /// responses keep their diagnostics.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                message: text.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %text.chars().take(500).collect::<String>(),
                    "Failed to parse service response"
                );
                Err(ApiError::Parse(e))
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.inner.client.get(self.url(path)).send().await?;
        Self::decode(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .inner
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetch the full product list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is undecodable.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_json("products").await
    }

    /// Create a product (admin-only; the service enforces authorization
    /// independently of the client-side capability gate).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        self.post_json("products", product).await
    }

    /// Delete a product (admin-only).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn delete_product(&self, product_id: ProductId) -> Result<(), ApiError> {
        let response = self
            .inner
            .client
            .delete(self.url(&format!("products/{product_id}")))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(ApiError::Status {
                status,
                message: text.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Authenticate with email and password.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; rejected credentials surface
    /// as [`ApiError::Status`] with the service's message in the body.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<AccountPayload, ApiError> {
        let body = LoginBody {
            email: email.as_str(),
            password: password.expose_secret(),
        };
        self.post_json("auth/login", &body).await
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; a taken email surfaces as
    /// [`ApiError::Status`] with the service's message in the body.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn register(
        &self,
        username: &str,
        email: &Email,
        password: &SecretString,
    ) -> Result<AccountPayload, ApiError> {
        let body = RegisterBody {
            username,
            email: email.as_str(),
            password: password.expose_secret(),
        };
        self.post_json("auth/register", &body).await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Fetch all orders for a user, in service order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>, ApiError> {
        self.get_json(&format!("orders/user/{user_id}")).await
    }

    /// Submit an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails. The caller must not mutate
    /// local state unless this resolves successfully.
    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn checkout(&self, request: &CheckoutRequest) -> Result<Order, ApiError> {
        self.post_json("orders/checkout", request).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_client(base: &str) -> ApiClient {
        let config = ClientConfig::new(base).unwrap();
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = test_client("http://localhost:8080/api/");
        assert_eq!(client.url("products"), "http://localhost:8080/api/products");
        assert_eq!(
            client.url("orders/user/5"),
            "http://localhost:8080/api/orders/user/5"
        );
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Status {
            status: StatusCode::UNAUTHORIZED,
            message: "Invalid email or password".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "service returned 401 Unauthorized: Invalid email or password"
        );
    }
}
