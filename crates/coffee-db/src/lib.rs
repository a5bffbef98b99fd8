//! # coffee-db: Database Layer for the Drink Catalog
//!
//! Persistence for drinks and their ingredients on SQLite via sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Drink Catalog Data Flow                          │
//! │                                                                         │
//! │  apps/api handler (search_drinks)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    coffee-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (drink.rs)   │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ DrinkRepo     │    │ 001_create_  │  │   │
//! │  │   │               │    │      │        │    │   drinks.sql │  │   │
//! │  │   └───────────────┘    └──────┼────────┘    └──────────────┘  │   │
//! │  │                               ▼                                │   │
//! │  │                        query.rs (search SQL + binds)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (DATABASE_PATH)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`query`] - Search query composition
//! - [`error`] - Database error types
//! - [`repository`] - Drink repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use coffee_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./coffee_shop.db")).await?;
//!
//! let id = db.drinks().create(&drink).await?;
//! let hits = db.drinks().search(&spec).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod query;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult, DbResultExt};
pub use pool::{Database, DbConfig};

pub use repository::drink::DrinkRepository;
