//! Article REST API.
//!
//! Binds the core store and query engine to an axum router. Every
//! mutating route validates its body before touching the store.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`    | `/api/articles?page&limit&search&status` | Search, filter, paginate |
//! | `GET`    | `/api/articles/{id}` | Fetch one article |
//! | `POST`   | `/api/articles` | Create an article |
//! | `PATCH`  | `/api/articles/{id}` | Update supplied fields |
//! | `DELETE` | `/api/articles/{id}` | Remove an article |
//! | `GET`    | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": "Article not found" }
//! { "error": "Validation failed", "fields": { "title": ["Title is required"] } }
//! ```
//!
//! # Concurrency
//!
//! The store sits behind one `RwLock`. Mutations take the write half; a list
//! query holds the read half while it searches and slices, so `meta.total`
//! always describes the snapshot the page came from.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use parking_lot::RwLock;
use quill_core::fuzzy::EditDistanceScorer;
use quill_core::models::Article;
use quill_core::query::{ArticleQuery, PageRequest, QueryEngine};
use quill_core::schema::{validate_new, validate_patch, ValidationErrors};
use quill_core::store::memory::InMemoryStore;
use quill_core::store::ArticleStore;
use quill_core::StoreError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

use crate::config::Config;
use crate::seed::build_store;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    store: Arc<RwLock<InMemoryStore>>,
    engine: Arc<QueryEngine>,
}

impl AppState {
    pub fn new(store: InMemoryStore, engine: QueryEngine) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            engine: Arc::new(engine),
        }
    }

    /// Seed a store and build the engine from `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(build_store(config)?, build_engine(config)))
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Query engine with the default scorer and the configured threshold.
pub fn build_engine(config: &Config) -> QueryEngine {
    QueryEngine::new(Arc::new(EditDistanceScorer), config.search.threshold)
}

/// Build the router with permissive CORS for browser clients.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/articles", get(handle_list).post(handle_create))
        .route(
            "/api/articles/{id}",
            get(handle_get).patch(handle_update).delete(handle_delete),
        )
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state)
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Starts the API server.
///
/// Seeds the store, binds `[server].bind`, and runs until Ctrl-C.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let engine = build_engine(config);
    let threshold = engine.threshold();
    let state = AppState::new(build_store(config)?, engine);
    if state.is_empty() {
        tracing::warn!("store seeded with zero articles");
    }
    let listener = TcpListener::bind(&config.server.bind).await?;

    info!(
        addr = %listener.local_addr()?,
        articles = state.len(),
        threshold,
        environment = ?config.seed.environment,
        "article API listening"
    );

    serve(listener, state, shutdown_signal()).await?;
    info!("article API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<BTreeMap<String, Vec<String>>>,
}

/// Internal error type that converts into an Axum HTTP response.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    fields: Option<BTreeMap<String, Vec<String>>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            fields: self.fields,
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        message: message.into(),
        fields: None,
    }
}

fn not_found() -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        message: "Article not found".to_string(),
        fields: None,
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError {
            status: StatusCode::BAD_REQUEST,
            message: "Validation failed".to_string(),
            fields: Some(errors.fields),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => not_found(),
            StoreError::InvalidStatus(s) => bad_request(format!("Invalid status: {s}")),
            StoreError::DuplicateId(_) => AppError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: err.to_string(),
                fields: None,
            },
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        bad_request(rejection.body_text())
    }
}

/// Response envelope for single-article routes.
#[derive(Serialize)]
struct ArticleEnvelope<'a> {
    article: &'a Article,
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /api/articles ============

/// Handler for `GET /api/articles`.
///
/// Query values are taken as raw strings so nothing is ever rejected:
/// unparseable `page`/`limit` fall back to `1`/`10`. When a key repeats,
/// the first value wins.
async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let first = |key: &str| {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    let query = ArticleQuery::new(
        first("search").unwrap_or_default(),
        first("status").unwrap_or_default(),
        PageRequest::parse(first("page"), first("limit")),
    );

    let store = state.store.read();
    let page = state.engine.run(store.list(), &query);
    debug!(
        search = %query.search,
        status = %query.status,
        total = page.meta.total,
        page = page.meta.page,
        "articles listed"
    );
    Json(page).into_response()
}

// ============ GET /api/articles/{id} ============

async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let store = state.store.read();
    let article = store.find(&id)?;
    Ok(Json(ArticleEnvelope { article }).into_response())
}

// ============ POST /api/articles ============

async fn handle_create(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = body?;
    let attrs = validate_new(&body)?;

    let article = state.store.write().create(attrs);
    info!(id = %article.id, "article created via API");
    Ok((
        StatusCode::CREATED,
        Json(ArticleEnvelope { article: &article }),
    )
        .into_response())
}

// ============ PATCH /api/articles/{id} ============

async fn handle_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = body?;
    let patch = validate_patch(&body)?;

    let mut store = state.store.write();
    let article = store.update(&id, patch)?;
    Ok(Json(ArticleEnvelope { article }).into_response())
}

// ============ DELETE /api/articles/{id} ============

async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.write().delete(&id)?;
    info!(id = %id, "article deleted via API");
    Ok(StatusCode::NO_CONTENT)
}
