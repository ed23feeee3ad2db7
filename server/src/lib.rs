//! HTTP front end for the todo store.
//!
//! # Overview
//! Maps REST verbs under `/v1/todos` onto `todo_core::Store` calls and
//! serializes results as JSON. The store is constructed by the caller and
//! shared with every handler through axum state.
//!
//! # Design
//! - Handlers are thin: decode, call the store, encode. Validation of the
//!   request body (non-empty titles) happens here, not in the store.
//! - All failures surface as `ApiError`, which renders `{"message": ...}`.
//! - `app()` builds a router over a fresh `MemoryStore`, so tests get an
//!   isolated instance per call.

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod models;

use std::{
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::catch_panic::CatchPanicLayer;
use todo_core::{MemoryStore, Store};

pub use error::ApiError;
pub use models::{CreateTodo, ErrorResponse, HealthResponse, UpdateTodo};
pub use todo_core::Item;

/// Also the `--request-timeout-secs` default.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub started_at: Instant,
}

/// Router over a new, empty `MemoryStore` with the default request timeout.
pub fn app() -> Router {
    router(Arc::new(MemoryStore::new()), DEFAULT_REQUEST_TIMEOUT)
}

pub fn router(store: Arc<dyn Store>, request_timeout: Duration) -> Router {
    let state = AppState {
        store,
        started_at: Instant::now(),
    };

    Router::new()
        .route(
            "/v1/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/v1/todos/",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/v1/todos/{id}",
            get(handlers::get_todo)
                .patch(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .route(
            "/v1/todos/{id}/",
            get(handlers::get_todo)
                .patch(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .route("/healthz", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(axum::middleware::from_fn_with_state(
            request_timeout,
            middleware::timeout,
        ))
        .layer(CatchPanicLayer::custom(middleware::handle_panic))
        .layer(axum::middleware::from_fn(middleware::request_id))
        .with_state(state)
}

/// Serves `app` on `listener` until `shutdown` is cancelled, then drains
/// in-flight connections. Peer addresses are exposed to handlers as
/// `ConnectInfo<SocketAddr>`.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: CancellationToken,
) -> Result<(), std::io::Error> {
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown.cancelled().await;
        tracing::info!("shutdown requested");
    })
    .await
}

/// Serves a fresh store on `listener` until the process exits.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app(), CancellationToken::new()).await
}
