//! JSON routes over the [`QueryEngine`].
//!
//! Handlers only unpack parameters and serialize results; all filtering and
//! cleaning happens in the engine.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::data::filter::EventQuery;
use crate::error::{EngineError, EngineResult};
use crate::query::{DatasetStats, EventRecord, GameSummary, QueryEngine, TimeRange};

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let status = match &self {
            EngineError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            EngineError::SourceLoad(_) | EngineError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            log::error!("{self}");
        }
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, EngineError>;

/// Run an engine call on the blocking pool. A cold cache reads the source
/// file under the cache lock, which must not stall a runtime worker.
async fn blocking<T, F>(engine: QueryEngine, op: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&QueryEngine) -> EngineResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || op(&engine))
        .await
        .map_err(|e| EngineError::Task(e.to_string()))?
        .map(Json)
}

#[derive(Debug, Default, Deserialize)]
struct GameParam {
    game: Option<String>,
}

#[derive(Debug, Serialize)]
struct ReloadResponse {
    rows: usize,
}

/// Build the application router.
pub fn router(engine: QueryEngine) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/events", get(events))
        .route("/api/games", get(games))
        .route("/api/teams", get(teams))
        .route("/api/event-types", get(event_types))
        .route("/api/players", get(players))
        .route("/api/stats", get(stats))
        .route("/api/time-range", get(time_range))
        .route("/api/reload", post(reload))
        .with_state(engine)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn events(
    State(engine): State<QueryEngine>,
    Query(query): Query<EventQuery>,
) -> ApiResult<Vec<EventRecord>> {
    blocking(engine, move |e| e.query_events(query)).await
}

async fn games(State(engine): State<QueryEngine>) -> ApiResult<Vec<GameSummary>> {
    blocking(engine, QueryEngine::list_games).await
}

async fn teams(
    State(engine): State<QueryEngine>,
    Query(param): Query<GameParam>,
) -> ApiResult<Vec<String>> {
    blocking(engine, move |e| e.list_teams(param.game.as_deref())).await
}

async fn event_types(State(engine): State<QueryEngine>) -> ApiResult<Vec<String>> {
    blocking(engine, QueryEngine::list_event_types).await
}

async fn players(State(engine): State<QueryEngine>) -> ApiResult<Vec<String>> {
    blocking(engine, QueryEngine::list_players).await
}

async fn stats(State(engine): State<QueryEngine>) -> ApiResult<DatasetStats> {
    blocking(engine, QueryEngine::stats).await
}

async fn time_range(State(engine): State<QueryEngine>) -> ApiResult<TimeRange> {
    blocking(engine, QueryEngine::time_range).await
}

async fn reload(State(engine): State<QueryEngine>) -> ApiResult<ReloadResponse> {
    blocking(engine, |e| {
        e.invalidate_cache();
        let table = e.canonical_table()?;
        Ok(ReloadResponse { rows: table.len() })
    })
    .await
}
