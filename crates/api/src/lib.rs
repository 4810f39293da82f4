use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use underval_core::domain::stock::StockRecord;
use underval_core::ingest::provider::FeedSource;
use underval_core::rank::SortKey;
use underval_core::render::html::render_page;
use underval_core::render::TableBody;
use underval_core::session::{LoadPhase, SessionError, TableSession};

/// One table session shared by every request. The mutex serialises
/// sort changes and row clicks in arrival order.
#[derive(Debug, Clone)]
pub struct AppState {
    session: Arc<Mutex<TableSession>>,
    feed_route: String,
}

impl AppState {
    pub fn new(feed_route: impl Into<String>) -> Self {
        Self::with_session(TableSession::new(), feed_route)
    }

    pub fn with_session(session: TableSession, feed_route: impl Into<String>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            feed_route: feed_route.into(),
        }
    }

    pub async fn phase(&self) -> LoadPhase {
        self.session.lock().await.phase()
    }
}

/// Fetches the feed once and publishes the result. The shared session keeps
/// showing the loading row until the fetch resolves.
pub async fn load_feed(state: &AppState, source: &dyn FeedSource) -> anyhow::Result<()> {
    let mut loaded = TableSession::new();
    let result = underval_core::ingest::load(&mut loaded, source).await;
    *state.session.lock().await = loaded;

    match result {
        Ok(report) => {
            tracing::info!(
                record_count = report.record_count,
                out_of_range = report.out_of_range.len(),
                "table ready"
            );
            Ok(())
        }
        Err(err) => Err(anyhow::Error::new(err).context("initial feed load failed")),
    }
}

pub fn build_router(state: AppState) -> Router {
    let feed_route = state.feed_route.clone();

    Router::new()
        .route("/healthz", get(healthz))
        .route("/", get(get_page))
        .route(&feed_route, get(get_feed))
        .route("/sort", get(sort_and_redirect))
        .route("/rows/:ticker/toggle", get(toggle_and_redirect))
        .route("/api/table", get(get_table))
        .route("/api/sort", post(post_sort))
        .route("/api/rows/:ticker/toggle", post(post_toggle))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub phase: LoadPhase,
    pub sort_key: SortKey,
    pub expanded_ticker: Option<String>,
    pub body: TableBody,
}

impl TableView {
    fn of(session: &TableSession) -> Self {
        Self {
            phase: session.phase(),
            sort_key: session.sort_key(),
            expanded_ticker: session.detail().expanded_ticker().map(String::from),
            body: session.body().clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortRequest {
    pub sort_key: String,
}

#[derive(Debug, Deserialize)]
struct SortQuery {
    key: Option<String>,
}

async fn get_page(State(state): State<AppState>) -> Html<String> {
    let session = state.session.lock().await;
    Html(render_page(session.body(), session.sort_key()))
}

async fn get_feed(State(state): State<AppState>) -> Result<Json<Vec<StockRecord>>, StatusCode> {
    let session = state.session.lock().await;
    if session.phase() != LoadPhase::Ready {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    Ok(Json(session.records().to_vec()))
}

async fn get_table(State(state): State<AppState>) -> Json<TableView> {
    let session = state.session.lock().await;
    Json(TableView::of(&session))
}

async fn post_sort(
    State(state): State<AppState>,
    Json(req): Json<SortRequest>,
) -> Result<Json<TableView>, StatusCode> {
    let mut session = state.session.lock().await;
    apply_sort(&mut session, &req.sort_key)?;
    Ok(Json(TableView::of(&session)))
}

async fn post_toggle(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<TableView>, StatusCode> {
    let mut session = state.session.lock().await;
    session.toggle_row(&ticker).map_err(session_status)?;
    Ok(Json(TableView::of(&session)))
}

async fn sort_and_redirect(
    State(state): State<AppState>,
    Query(query): Query<SortQuery>,
) -> Result<Redirect, StatusCode> {
    let mut session = state.session.lock().await;
    apply_sort(&mut session, query.key.as_deref().unwrap_or_default())?;
    Ok(Redirect::to("/"))
}

async fn toggle_and_redirect(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Redirect, StatusCode> {
    let mut session = state.session.lock().await;
    session.toggle_row(&ticker).map_err(session_status)?;
    Ok(Redirect::to("/"))
}

fn apply_sort(session: &mut TableSession, raw_key: &str) -> Result<(), StatusCode> {
    if session.phase() != LoadPhase::Ready {
        return Err(session_status(SessionError::NotReady(session.phase())));
    }
    session.render(SortKey::parse_or_default(raw_key));
    Ok(())
}

fn session_status(err: SessionError) -> StatusCode {
    match err {
        SessionError::NotReady(_) => StatusCode::SERVICE_UNAVAILABLE,
        SessionError::UnknownTicker(ticker) => {
            tracing::debug!(%ticker, "toggle for unknown row");
            StatusCode::NOT_FOUND
        }
    }
}
