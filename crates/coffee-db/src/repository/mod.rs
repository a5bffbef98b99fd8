//! # Repository Module
//!
//! Database repository implementations for the drink catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                           │
//! │       │                                                                 │
//! │       │  db.drinks().search(&spec)                                     │
//! │       ▼                                                                 │
//! │  DrinkRepository                                                       │
//! │  ├── create(&self, drink)    → transaction: drink + ingredient rows    │
//! │  ├── delete(&self, id)       → transaction: drink + ingredient rows    │
//! │  ├── search(&self, spec)     → query::build_search_query               │
//! │  └── get_by_id(&self, id)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`DrinkRepository`](drink::DrinkRepository) - Drink create, delete and search

pub mod drink;
