//! HTTP endpoints.
//!
//! - `GET /` serves the publication list page
//! - `GET /static/script.js` serves its script
//! - `GET /fetch-publications?author=<name>[&sort=popular|latest|oldest]` returns JSON
//! - `GET /health` returns `OK`

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::fetcher::PublicationFetcher;
use crate::models::{Publication, SortBy, UnknownSortKey};
use crate::sources::SourceError;

const INDEX_HTML: &str = include_str!("../../static/index.html");
const SCRIPT_JS: &str = include_str!("../../static/script.js");

/// State shared by all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    fetcher: PublicationFetcher,
    default_author: String,
}

impl AppState {
    pub fn new(fetcher: PublicationFetcher, default_author: impl Into<String>) -> Self {
        Self {
            fetcher,
            default_author: default_author.into(),
        }
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/static/script.js", get(script_handler))
        .route("/health", get(health_handler))
        .route("/fetch-publications", get(publications_handler))
        .with_state(state)
}

/// Serve on an already bound listener until Ctrl-C / SIGTERM.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Bind `addr` (`host:port`, host may be a name) and serve.
pub async fn bind_and_serve(addr: &str, state: Arc<AppState>) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve(listener, state).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down");
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        SCRIPT_JS,
    )
}

async fn health_handler() -> &'static str {
    "OK"
}

#[derive(Debug, Deserialize)]
struct PublicationsQuery {
    author: Option<String>,
    sort: Option<String>,
}

async fn publications_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PublicationsQuery>,
) -> Result<Json<Vec<Publication>>, ApiError> {
    let sort = query
        .sort
        .as_deref()
        .map(str::parse::<SortBy>)
        .transpose()?;
    let author = query
        .author
        .unwrap_or_else(|| state.default_author.clone());

    tracing::info!(author = %author, sort = ?sort, "Fetch publications request");

    let mut publications = state.fetcher.fetch_publications(&author).await?;
    if let Some(sort) = sort {
        sort.apply(&mut publications);
    }

    Ok(Json(publications))
}

/// Errors surfaced to HTTP clients
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Sort(#[from] UnknownSortKey),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Sort(_) => StatusCode::BAD_REQUEST,
            ApiError::Source(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
