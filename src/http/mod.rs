//! HTTP surface - history retrieval plus an administrative refresh trigger.
//!
//! ## Routes
//!
//! - `GET /health`: `{ "ok": true }`.
//! - `GET /api/dates`: committed dates, newest first.
//! - `GET /api/words/:date`: the three records for `date` (`404` if none, `400` if `date` is not `YYYY-MM-DD`).
//! - `POST /api/admin/refresh`: run the daily selection for today now and return the outcome.
//!
//! ## Example
//!
//! ```ignore
//! let state = AppState::new(engine);
//!
//! // Compose with other axum routes
//! let app = lexicon_daily::http::router(state.clone());
//!
//! // Or serve directly
//! lexicon_daily::http::serve(state, addr, shutdown_signal()).await?;
//! ```

mod error;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::engine::{RunOutcome, SelectionEngine};
use crate::history::DayEntry;
use crate::retrieval;

pub use error::{ApiError, ApiResult, ErrorResponse};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<SelectionEngine>,
}

impl AppState {
    pub fn new(engine: Arc<SelectionEngine>) -> Self {
        Self { engine }
    }
}

/// Build the axum `Router`.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/dates", get(list_dates_handler))
        .route("/words/:date", get(get_words_handler))
        .route("/admin/refresh", post(refresh_handler));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve on `addr` until `shutdown` resolves.
pub async fn serve<F>(state: AppState, addr: SocketAddr, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "http server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// `GET /health`
async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// `GET /api/dates`
async fn list_dates_handler(State(state): State<AppState>) -> ApiResult<Json<Vec<NaiveDate>>> {
    let dates = retrieval::list_dates(state.engine.stores().history.as_ref())?;
    Ok(Json(dates))
}

/// `GET /api/words/:date`
async fn get_words_handler(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<Json<DayEntry>> {
    let words = retrieval::get_words_by_key(state.engine.stores().history.as_ref(), &date)?;
    Ok(Json(words))
}

/// `POST /api/admin/refresh`
async fn refresh_handler(State(state): State<AppState>) -> ApiResult<Json<RunOutcome>> {
    let outcome = state.engine.ensure_today().await?;
    tracing::info!(?outcome, "manual refresh finished");
    Ok(Json(outcome))
}
