//! HTTP client for the REST backend.

use reqwest::{Client, Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use super::{Query, RestError};

/// Configuration for connecting to the hosted backend.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Project address, e.g. `"https://example.supabase.co"`.
    pub base_url: String,

    /// Public API key, sent both as `apikey` and as the bearer token.
    pub api_key: String,
}

/// Menu and orders services backed by the hosted database.
#[derive(Debug, Clone)]
pub struct RestBackend {
    config: RestConfig,
    http: Client,
}

impl RestBackend {
    /// Create a new backend from the given configuration.
    #[must_use]
    pub fn new(config: RestConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    pub(crate) fn table_url(&self, table: &str) -> String {
        format!(
            "{}/rest/v1/{table}",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Fetch rows.
    pub(crate) async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, RestError> {
        self.send(self.request(Method::GET, table, query)).await
    }

    /// Insert rows and return them as stored.
    pub(crate) async fn insert<B, T>(&self, table: &str, rows: &B) -> Result<Vec<T>, RestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .request(Method::POST, table, &Query::new())
            .header("Prefer", "return=representation")
            .json(rows);

        self.send(request).await
    }

    /// Patch every row matching `query` and return the updated rows.
    pub(crate) async fn update<B, T>(
        &self,
        table: &str,
        query: &Query,
        patch: &B,
    ) -> Result<Vec<T>, RestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .request(Method::PATCH, table, query)
            .header("Prefer", "return=representation")
            .json(patch);

        self.send(request).await
    }

    /// Delete every row matching `query` and return the deleted rows.
    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, RestError> {
        let request = self
            .request(Method::DELETE, table, query)
            .header("Prefer", "return=representation");

        self.send(request).await
    }

    fn request(&self, method: Method, table: &str, query: &Query) -> RequestBuilder {
        debug!(method = method.as_str(), table, query = ?query.pairs(), "backend request");

        self.http
            .request(method, self.table_url(table))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .query(query.pairs())
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Vec<T>, RestError> {
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(RestError::rejected(status, &text));
        }

        Ok(response.json().await?)
    }
}
