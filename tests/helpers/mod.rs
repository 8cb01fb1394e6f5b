//! Test helpers: an in-memory catalog and a local fake of the upstream API

#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use recipe_proxy::models::recipe::{RecipeId, RecipePage, SearchQuery};
use recipe_proxy::services::catalog::{CatalogError, RecipeCatalogClient, SpoonacularClient};
use recipe_proxy::AppState;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TEST_API_KEY: &str = "test-key-0123456789";

type SearchFn = Box<dyn Fn(&SearchQuery) -> Result<RecipePage, CatalogError> + Send + Sync>;
type DetailFn = Box<dyn Fn(RecipeId) -> Result<Value, CatalogError> + Send + Sync>;

/// Catalog double that counts calls and remembers the last search it saw.
pub struct FakeCatalog {
    search: SearchFn,
    detail: DetailFn,
    calls: Arc<AtomicUsize>,
    last_query: Arc<Mutex<Option<SearchQuery>>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self {
            search: Box::new(|_| Ok(RecipePage::default())),
            detail: Box::new(|id| Ok(json!({ "id": id.get() }))),
            calls: Arc::new(AtomicUsize::new(0)),
            last_query: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_search<F>(mut self, f: F) -> Self
    where
        F: Fn(&SearchQuery) -> Result<RecipePage, CatalogError> + Send + Sync + 'static,
    {
        self.search = Box::new(f);
        self
    }

    pub fn with_detail<F>(mut self, f: F) -> Self
    where
        F: Fn(RecipeId) -> Result<Value, CatalogError> + Send + Sync + 'static,
    {
        self.detail = Box::new(f);
        self
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }

    pub fn last_query(&self) -> Arc<Mutex<Option<SearchQuery>>> {
        self.last_query.clone()
    }
}

#[async_trait]
impl RecipeCatalogClient for FakeCatalog {
    async fn search(&self, query: &SearchQuery) -> Result<RecipePage, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());
        (self.search)(query)
    }

    async fn get_by_id(&self, id: RecipeId) -> Result<Value, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.detail)(id)
    }
}

/// How the fake upstream answers every request.
#[derive(Clone)]
pub enum UpstreamMode {
    Json(Value),
    Status(u16),
    Delayed(Duration, Value),
    Raw(&'static str),
}

/// A request received by the fake upstream.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub params: HashMap<String, String>,
}

#[derive(Clone)]
struct UpstreamState {
    mode: UpstreamMode,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct FakeUpstream {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeUpstream {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// A real client pointed at this fake with the given timeout.
    pub fn client(&self, timeout: Duration) -> SpoonacularClient {
        SpoonacularClient::new(TEST_API_KEY, self.base_url.clone(), timeout)
            .expect("Failed to build catalog client")
    }
}

async fn upstream_handler(
    State(state): State<UpstreamState>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.requests.lock().unwrap().push(RecordedRequest {
        path: uri.path().to_string(),
        params,
    });

    match state.mode {
        UpstreamMode::Json(body) => Json(body).into_response(),
        UpstreamMode::Status(code) => {
            let status = StatusCode::from_u16(code).unwrap();
            (status, Json(json!({ "status": "failure", "code": code }))).into_response()
        }
        UpstreamMode::Delayed(delay, body) => {
            tokio::time::sleep(delay).await;
            Json(body).into_response()
        }
        UpstreamMode::Raw(body) => body.into_response(),
    }
}

/// Start a fake recipe API on an ephemeral port.
pub async fn spawn_upstream(mode: UpstreamMode) -> FakeUpstream {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = UpstreamState {
        mode,
        requests: requests.clone(),
    };
    let app = Router::new().fallback(upstream_handler).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake upstream");
    let addr = listener.local_addr().expect("Failed to get local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeUpstream {
        base_url: format!("http://{}", addr),
        requests,
    }
}

/// Start the proxy itself on an ephemeral port and return its base URL.
pub async fn spawn_app(state: AppState) -> String {
    let app = recipe_proxy::app(state, None);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind proxy");
    let addr = listener.local_addr().expect("Failed to get local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}
