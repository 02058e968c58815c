use anyhow::{bail, Result};
use axum::{extract::{Path, Query, State}, http::{HeaderMap, StatusCode}, routing::{get, post}, Json, Router};
use lexsearch_core::dataset::load_texts;
use lexsearch_core::{DocId, Document, SearchEngine, DEFAULT_LIMIT};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub struct Config {
    pub dataset: PathBuf,
    /// Upper bound applied to `k` on every search.
    pub max_results: usize,
    pub admin_token: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { DEFAULT_LIMIT }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub score: f32,
    pub title: String,
    pub description: String,
}

#[derive(Serialize)]
pub struct DocResponse {
    pub doc_id: DocId,
    pub title: String,
    pub text: String,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub num_docs: usize,
    pub vocabulary_size: usize,
}

/// Shared handler state. Only constructible around an engine that already holds documents.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<RwLock<SearchEngine>>,
    dataset: PathBuf,
    max_results: usize,
    admin_token: Option<String>,
}

impl AppState {
    pub fn new(engine: SearchEngine, config: Config) -> Result<Self> {
        if !engine.is_loaded() {
            bail!("dataset {} contains no documents", config.dataset.display());
        }
        Ok(Self {
            engine: Arc::new(RwLock::new(engine)),
            dataset: config.dataset,
            max_results: config.max_results,
            admin_token: config.admin_token,
        })
    }
}

/// Read the dataset at `config.dataset`, ingest it and build the router.
pub fn build_app(config: Config) -> Result<Router> {
    let texts = load_texts(&config.dataset)?;
    let mut engine = SearchEngine::new();
    engine.ingest(texts);
    let state = AppState::new(engine, config)?;
    Ok(router(state))
}

pub fn router(state: AppState) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .route("/stats", get(stats_handler))
        .route("/index/reload", post(reload_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let engine = state.engine.read();
    let ranked = engine.rank(&params.q);
    let total_hits = ranked.len();
    let k = params.k.min(state.max_results);
    let results: Vec<SearchHit> = ranked
        .into_iter()
        .take(k)
        .map(|hit| SearchHit {
            doc_id: hit.document.id,
            score: hit.score,
            title: title(hit.document),
            description: description(hit.document),
        })
        .collect();
    drop(engine);

    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, total_hits, took_s = elapsed.as_secs_f64(), "search");
    Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), total_hits, results })
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<DocId>) -> Result<Json<DocResponse>, (StatusCode, String)> {
    let engine = state.engine.read();
    match engine.get_document(doc_id) {
        Some(doc) => Ok(Json(DocResponse { doc_id, title: title(doc), text: doc.text.clone() })),
        None => Err((StatusCode::NOT_FOUND, format!("document {doc_id} not found"))),
    }
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let engine = state.engine.read();
    Json(StatsResponse { num_docs: engine.len(), vocabulary_size: engine.vocabulary().len() })
}

/// Reload the dataset from disk and re-ingest it. The old corpus keeps serving while the
/// replacement is built and also if loading fails; the write lock is only taken for the swap.
async fn reload_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<StatsResponse>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let dataset = state.dataset.clone();
    let engine = Arc::clone(&state.engine);
    let next = tokio::task::spawn_blocking(move || -> Result<SearchEngine> {
        let texts = load_texts(&dataset)?;
        let mut next = engine.read().successor();
        if next.ingest(texts) == 0 {
            bail!("dataset {} contains no documents", dataset.display());
        }
        Ok(next)
    })
    .await
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")))?;

    let stats = StatsResponse { num_docs: next.len(), vocabulary_size: next.vocabulary().len() };
    let previous = std::mem::replace(&mut *state.engine.write(), next);
    drop(previous);
    tracing::info!(num_docs = stats.num_docs, vocabulary_size = stats.vocabulary_size, "reloaded dataset");
    Ok(Json(stats))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}

/// First line of the document, trimmed.
fn title(doc: &Document) -> String {
    doc.text.lines().next().unwrap_or("").trim().to_string()
}

/// The second and third non-empty lines, joined by a space.
fn description(doc: &Document) -> String {
    doc.text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .skip(1)
        .take(2)
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
}
