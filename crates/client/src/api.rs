//! REST client for the `/api/items` endpoints.
//!
//! [`ItemsApi`] is the transport seam the [`ItemStore`](crate::store::ItemStore)
//! is written against; [`HttpItemsApi`] implements it with [`reqwest`].

use async_trait::async_trait;
use itemdesk_core::item::{Item, ItemInput};
use itemdesk_core::types::DbId;
use serde::Deserialize;

use crate::config::ClientConfig;

/// Errors from the item API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, decoding, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-2xx status code.
    #[error("Item API error ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// `error` field of the JSON error body, or the raw body.
        message: String,
    },
}

impl ClientError {
    /// HTTP status of a rejected request, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// The five item operations the client needs.
#[async_trait]
pub trait ItemsApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Item>, ClientError>;
    async fn get(&self, id: DbId) -> Result<Item, ClientError>;
    async fn create(&self, input: &ItemInput) -> Result<Item, ClientError>;
    async fn update(&self, id: DbId, input: &ItemInput) -> Result<Item, ClientError>;
    async fn delete(&self, id: DbId) -> Result<(), ClientError>;
}

/// Error body produced by the service.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for one item service instance.
pub struct HttpItemsApi {
    client: reqwest::Client,
    items_url: String,
}

impl HttpItemsApi {
    /// * `base_url` - service root, e.g. `http://localhost:3001`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            items_url: format!("{}/api/items", base_url.trim_end_matches('/')),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    fn item_url(&self, id: DbId) -> String {
        format!("{}/{id}", self.items_url)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, turning an error body
    /// into [`ClientError::Status`].
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ItemsApi for HttpItemsApi {
    async fn list(&self) -> Result<Vec<Item>, ClientError> {
        let response = self.client.get(&self.items_url).send().await?;
        Self::parse_response(response).await
    }

    async fn get(&self, id: DbId) -> Result<Item, ClientError> {
        let response = self.client.get(self.item_url(id)).send().await?;
        Self::parse_response(response).await
    }

    async fn create(&self, input: &ItemInput) -> Result<Item, ClientError> {
        let response = self.client.post(&self.items_url).json(input).send().await?;
        Self::parse_response(response).await
    }

    async fn update(&self, id: DbId, input: &ItemInput) -> Result<Item, ClientError> {
        let response = self.client.put(self.item_url(id)).json(input).send().await?;
        Self::parse_response(response).await
    }

    async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        let response = self.client.delete(self.item_url(id)).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}
