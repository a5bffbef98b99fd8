//! # coffee-core: Pure Logic for the Drink Catalog
//!
//! Everything in this crate is deterministic and free of I/O: the drink
//! entity, money and date validation, and the parsing of raw search
//! parameters into a typed [`DrinkSearchSpec`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Drink Catalog Data Flow                          │
//! │                                                                         │
//! │  HTTP (apps/api)                                                        │
//! │    POST /drink      DELETE /drink?id=      GET /drinks?name=&date=...   │
//! │         │                  │                        │                   │
//! │  ┌──────▼──────────────────▼────────────────────────▼───────────────┐  │
//! │  │               ★ coffee-core (THIS CRATE) ★                       │  │
//! │  │                                                                   │  │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌────────────┐  │  │
//! │  │   │   types   │  │   money   │  │ validation │  │   search   │  │  │
//! │  │   │   Drink   │  │   Money   │  │ date order │  │ SearchSpec │  │  │
//! │  │   │ SearchPage│  │  "D.CC"   │  │ ingredients│  │  builder   │  │  │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └────────────┘  │  │
//! │  └───────────────────────────────┬───────────────────────────────────┘  │
//! │                                  │                                       │
//! │  ┌───────────────────────────────▼───────────────────────────────────┐  │
//! │  │          coffee-db: query composer + drink repository             │  │
//! │  └───────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use coffee_core::search::DrinkSearchSpec;
//!
//! let spec = DrinkSearchSpec::from_params([("name", "Latte"), ("limit", "10")]).unwrap();
//! assert_eq!(spec.name.as_deref(), Some("Latte"));
//! assert_eq!(spec.limit, Some(10));
//! assert_eq!(spec.offset, None);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod search;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use search::DrinkSearchSpec;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Largest dollar amount accepted for a drink price.
pub const MAX_DOLLAR_AMOUNT: i64 = 1000;

/// Separator used between ingredient names, both in the `ingredients`
/// search parameter and in the aggregated ingredient column.
pub const INGREDIENT_DELIMITER: char = ',';
