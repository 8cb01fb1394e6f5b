//! Recipe catalog client
//!
//! Outbound access to the Spoonacular recipe API. Handlers depend on the
//! [`RecipeCatalogClient`] trait so a fake catalog can stand in for the network
//! during tests.
//!
//! Upstream docs: <https://spoonacular.com/food-api/docs>

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::error::Error as _;
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::models::recipe::{RecipeId, RecipePage, SearchQuery, PAGE_SIZE};

/// Read access to an upstream recipe catalog.
#[async_trait]
pub trait RecipeCatalogClient: Send + Sync {
    /// Run a paged recipe search.
    async fn search(&self, query: &SearchQuery) -> Result<RecipePage, CatalogError>;

    /// Fetch the full upstream payload for a single recipe.
    async fn get_by_id(&self, id: RecipeId) -> Result<serde_json::Value, CatalogError>;
}

/// Error type for catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Upstream request timed out")]
    Timeout,

    #[error("Upstream returned HTTP {0}")]
    Status(StatusCode),

    #[error("Upstream request failed: {0}")]
    Transport(String),

    #[error("Upstream returned an unreadable payload: {0}")]
    Decode(String),

    #[error("Catalog client configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    /// Timeouts, connection failures and non-2xx statuses.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CatalogError::Timeout | CatalogError::Status(_) | CatalogError::Transport(_)
        )
    }

    fn outcome(&self) -> &'static str {
        match self {
            CatalogError::Timeout => "timeout",
            CatalogError::Status(_) => "status",
            CatalogError::Transport(_) => "transport",
            CatalogError::Decode(_) => "decode",
            CatalogError::Config(_) => "config",
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return CatalogError::Timeout;
        }
        if let Some(status) = err.status() {
            return CatalogError::Status(status);
        }
        // The request URL carries the API key, so it never goes into the message.
        let err = err.without_url();
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        CatalogError::Transport(message)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Decode(err.to_string())
    }
}

/// Query string sent to `/recipes/complexSearch`. Empty filters are skipped.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchParams<'a> {
    api_key: &'a str,
    number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    add_recipe_information: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    diet: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exclude_ingredients: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    include_ingredients: Option<&'a str>,
}

impl<'a> SearchParams<'a> {
    fn new(api_key: &'a str, query: &'a SearchQuery) -> Self {
        Self {
            api_key,
            number: PAGE_SIZE,
            offset: (query.offset > 0).then_some(query.offset),
            add_recipe_information: true,
            query: query.query(),
            diet: query.diet(),
            exclude_ingredients: query.exclude_ingredients(),
            include_ingredients: query.include_ingredients(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetailParams<'a> {
    api_key: &'a str,
    include_nutrition: bool,
}

/// The two fields of a search response this service cares about. Their
/// shapes are not checked; missing or null values take the empty defaults.
#[derive(Debug, Deserialize)]
struct UpstreamSearchPage {
    #[serde(default)]
    results: Option<serde_json::Value>,
    #[serde(default, rename = "totalResults")]
    total_results: Option<serde_json::Value>,
}

impl From<UpstreamSearchPage> for RecipePage {
    fn from(page: UpstreamSearchPage) -> Self {
        let defaults = RecipePage::default();
        Self {
            results: page.results.unwrap_or(defaults.results),
            total_results: page.total_results.unwrap_or(defaults.total_results),
        }
    }
}

/// Client for the Spoonacular REST API.
pub struct SpoonacularClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl SpoonacularClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let http = Client::builder()
            .user_agent(concat!("recipe-proxy/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        Self::new(
            config.api_key.clone(),
            config.api_base_url.clone(),
            config.upstream_timeout(),
        )
    }

    async fn get_json<P, T>(&self, url: &str, params: &P) -> Result<T, CatalogError>
    where
        P: Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .http
            .get(url)
            .query(params)
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl RecipeCatalogClient for SpoonacularClient {
    async fn search(&self, query: &SearchQuery) -> Result<RecipePage, CatalogError> {
        let url = format!("{}/recipes/complexSearch", self.base_url);
        let params = SearchParams::new(&self.api_key, query);

        tracing::debug!(
            offset = query.offset,
            query = ?query.query(),
            "Searching upstream recipe catalog"
        );

        let started = Instant::now();
        let result = self
            .get_json::<_, UpstreamSearchPage>(&url, &params)
            .await
            .map(RecipePage::from);
        record_call("search", &result, started);
        result
    }

    async fn get_by_id(&self, id: RecipeId) -> Result<serde_json::Value, CatalogError> {
        let url = format!("{}/recipes/{}/information", self.base_url, id);
        let params = DetailParams {
            api_key: &self.api_key,
            include_nutrition: true,
        };

        tracing::debug!(recipe_id = id.get(), "Fetching recipe information");

        let started = Instant::now();
        let result: Result<serde_json::Value, CatalogError> = self.get_json(&url, &params).await;
        record_call("get_by_id", &result, started);
        result
    }
}

fn record_call<T>(operation: &'static str, result: &Result<T, CatalogError>, started: Instant) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    metrics::counter!(
        "upstream_requests_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("upstream_request_seconds", "operation" => operation)
        .record(started.elapsed().as_secs_f64());
}
