//! # Coffee Shop API
//!
//! HTTP server for the drink catalog.
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Coffee API Routes                              │
//! │                                                                         │
//! │  POST   /drink          body: Drink JSON      → {"id": "<uuid>"}        │
//! │  DELETE /drink?id=<id>                        → {"status": "success"}   │
//! │  GET    /drinks?name=&date=&offset=&limit=&ingredients=                 │
//! │                                               → SearchPage              │
//! │  GET    /health                               → {"status": "ok", ...}   │
//! │                                                 503 while migrating     │
//! │                                                                         │
//! │  Errors: {"error": "<message>"}, 400 for client errors, 500 otherwise   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `HTTP_PORT` - listen port (default: 8080)
//! - `DATABASE_PATH` - SQLite file (default: ./coffee_shop.db)
//! - `DB_MAX_CONNECTIONS` - pool size (default: 5)
//! - `DB_CONNECT_TIMEOUT_SECS` - pool acquire / busy timeout (default: 30)
//! - `RUST_LOG` - log filter (default: info)

pub mod config;
pub mod error;
pub mod handlers;

use axum::routing::{get, post};
use axum::Router;
use coffee_db::Database;
use tower_http::trace::TraceLayer;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};

/// Shared application state.
///
/// The database handle is the only state shared between requests.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/drink",
            post(handlers::create_drink).delete(handlers::delete_drink),
        )
        .route("/drinks", get(handlers::search_drinks))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
