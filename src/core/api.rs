//! HTTP API for the dream journal
//!
//! Endpoints:
//! - GET /health - Health check
//! - POST /analyze - Analyze a text without storing it
//! - POST /users - Register a user
//! - DELETE /users/:id - Delete a user and their dreams
//! - POST /users/:id/dreams - Record a dream
//! - GET /users/:id/dreams - List dreams, oldest first
//! - GET /users/:id/dreams/:entry_id/analysis - Detailed analysis of a stored dream
//! - GET /users/:id/trends?days= - Mood trend report
//! - GET /users/:id/themes?min_dreams= - Recurring themes
//! - GET /users/:id/insights - Trend report, themes and feedback paragraph
//! - GET /users/:id/patterns - Monthly summary, distribution and report
//!
//! Insufficient data and degraded results are 200 responses carrying the
//! sentinel; only an unknown user is 404.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn, error};

use crate::core::journal::{synthesize, DreamJournal};
use crate::core::store::{write_journal, EntryStore, MemoryStore, StoreError};
use crate::types::{
    AnalysisResult, DreamEntry, EntryId, PatternResult, ThemeResult, TrendReport, User, UserId,
};

/// App state
pub struct AppState {
    pub journal: DreamJournal<MemoryStore>,
    /// Journal file rewritten after every mutation, if any
    pub journal_path: Option<String>,
    /// Held from snapshot to end of write so files land in mutation order
    pub persist_lock: Mutex<()>,
}

/// Analyze / record request
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

/// Register request
#[derive(Debug, Deserialize)]
pub struct NewUserRequest {
    pub username: String,
    #[serde(default)]
    pub password_hash: String,
}

/// Delete response
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    pub user_id: UserId,
    pub entries_removed: usize,
}

/// Health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Insights response: the trend report and themes the feedback was built from
#[derive(Debug, Serialize, Deserialize)]
pub struct InsightsResponse {
    pub user_id: UserId,
    pub mood_trends: TrendReport,
    pub themes: ThemeResult,
    pub feedback: String,
}

/// Stored dream with a fresh detailed analysis
#[derive(Debug, Serialize, Deserialize)]
pub struct EntryAnalysisResponse {
    pub entry: DreamEntry,
    pub analysis: AnalysisResult,
}

#[derive(Debug, Deserialize)]
pub struct TrendsQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ThemesQuery {
    pub min_dreams: Option<usize>,
}

/// Create the API router
pub fn create_router(journal: DreamJournal<MemoryStore>, journal_path: Option<String>) -> Router {
    let state = Arc::new(AppState {
        journal,
        journal_path,
        persist_lock: Mutex::new(()),
    });

    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .route("/users", post(create_user))
        .route("/users/:id", axum::routing::delete(delete_user))
        .route("/users/:id/dreams", post(record_dream).get(list_dreams))
        .route("/users/:id/dreams/:entry_id/analysis", get(entry_analysis))
        .route("/users/:id/trends", get(trends))
        .route("/users/:id/themes", get(themes))
        .route("/users/:id/insights", get(insights))
        .route("/users/:id/patterns", get(patterns))
        .with_state(state)
}

fn status_for(e: &StoreError) -> StatusCode {
    match e {
        StoreError::UserNotFound(_) | StoreError::EntryNotFound(_) => StatusCode::NOT_FOUND,
        StoreError::DuplicateUsername(_) => StatusCode::CONFLICT,
        StoreError::ScoreOutOfRange(_) => StatusCode::UNPROCESSABLE_ENTITY,
        StoreError::Poisoned | StoreError::Io(_) | StoreError::Serialize(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// 404 unless the user exists
fn require_user(state: &AppState, user_id: UserId) -> Result<(), StatusCode> {
    match state.journal.store().user_exists(user_id) {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!(user_id, error = %e, "User lookup failed");
            Err(status_for(&e))
        }
    }
}

/// Rewrite the journal file, if configured, off the async worker
async fn persist(state: &AppState) -> Result<(), StatusCode> {
    let path = match &state.journal_path {
        Some(path) => path.clone(),
        None => return Ok(()),
    };

    let _guard = state.persist_lock.lock().await;
    let data = state.journal.store().snapshot().map_err(|e| {
        error!(error = %e, "Failed to snapshot journal");
        status_for(&e)
    })?;

    let target = path.clone();
    match tokio::task::spawn_blocking(move || write_journal(&data, &target)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            error!(path = %path, error = %e, "Failed to save journal");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
        Err(e) => {
            error!(path = %path, error = %e, "Journal write task failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TextRequest>,
) -> Json<AnalysisResult> {
    Json(state.journal.analyze(&req.text))
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewUserRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    if req.username.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let user: User = state
        .journal
        .store()
        .create_user(&req.username, &req.password_hash)
        .map_err(|e| {
            warn!(username = %req.username, error = %e, "User not created");
            status_for(&e)
        })?;
    persist(&state).await?;
    info!(user_id = user.id, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<UserId>,
) -> Result<Json<DeleteUserResponse>, StatusCode> {
    let entries_removed = state.journal.store().delete_user(id).map_err(|e| status_for(&e))?;
    persist(&state).await?;
    Ok(Json(DeleteUserResponse { user_id: id, entries_removed }))
}

async fn record_dream(
    State(state): State<Arc<AppState>>,
    Path(id): Path<UserId>,
    Json(req): Json<TextRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    if req.text.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let entry: DreamEntry = state
        .journal
        .record_dream(id, &req.text)
        .map_err(|e| status_for(&e))?;
    persist(&state).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn list_dreams(
    State(state): State<Arc<AppState>>,
    Path(id): Path<UserId>,
) -> Result<Json<Vec<DreamEntry>>, StatusCode> {
    let entries = state.journal.store().entries_for(id).map_err(|e| status_for(&e))?;
    Ok(Json(entries))
}

async fn entry_analysis(
    State(state): State<Arc<AppState>>,
    Path((id, entry_id)): Path<(UserId, EntryId)>,
) -> Result<Json<EntryAnalysisResponse>, StatusCode> {
    require_user(&state, id)?;
    let entry = state.journal.store().entry(entry_id).map_err(|e| status_for(&e))?;
    if entry.user_id != id {
        return Err(StatusCode::NOT_FOUND);
    }
    let analysis = state.journal.analyze(&entry.text);
    Ok(Json(EntryAnalysisResponse { entry, analysis }))
}

async fn trends(
    State(state): State<Arc<AppState>>,
    Path(id): Path<UserId>,
    Query(query): Query<TrendsQuery>,
) -> Result<Json<TrendReport>, StatusCode> {
    require_user(&state, id)?;
    let days = query.days.unwrap_or(state.journal.config().lookback_days);
    Ok(Json(state.journal.mood_trends(id, days)))
}

async fn themes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<UserId>,
    Query(query): Query<ThemesQuery>,
) -> Result<Json<ThemeResult>, StatusCode> {
    require_user(&state, id)?;
    let min_dreams = query.min_dreams.unwrap_or(state.journal.config().min_dreams);
    Ok(Json(state.journal.theme_result(id, min_dreams)))
}

async fn insights(
    State(state): State<Arc<AppState>>,
    Path(id): Path<UserId>,
) -> Result<Json<InsightsResponse>, StatusCode> {
    require_user(&state, id)?;
    let config = state.journal.config();
    let mood_trends = state.journal.mood_trends(id, config.lookback_days);
    let themes = state.journal.theme_result(id, config.min_dreams);
    let feedback = synthesize(&mood_trends, themes.themes.as_deref());
    Ok(Json(InsightsResponse {
        user_id: id,
        mood_trends,
        themes,
        feedback,
    }))
}

async fn patterns(
    State(state): State<Arc<AppState>>,
    Path(id): Path<UserId>,
) -> Result<Json<PatternResult>, StatusCode> {
    require_user(&state, id)?;
    Ok(Json(state.journal.pattern_result(id)))
}

/// Run the API server
pub async fn run_server(
    addr: &str,
    journal: DreamJournal<MemoryStore>,
    journal_path: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(journal, journal_path);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, "Dream journal API running");
    axum::serve(listener, router).await?;

    Ok(())
}
