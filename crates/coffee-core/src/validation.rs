//! # Validation Module
//!
//! Field-level sanity checks for drinks.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (apps/api)                                      │
//! │  └── JSON decoding into Drink                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (via Drink::validate)                            │
//! │  ├── price shape and range                                             │
//! │  ├── start/end ordering                                                │
//! │  └── ingredient names                                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE / foreign key constraints                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::money::Money;
use crate::INGREDIENT_DELIMITER;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a price string. See [`Money::parse`] for the rules.
///
/// ## Example
/// ```rust
/// use coffee_core::validation::validate_money;
///
/// assert!(validate_money("3.75").is_ok());
/// assert!(validate_money("3.7").is_err());
/// assert!(validate_money("1000.01").is_ok());
/// assert!(validate_money("1001.00").is_err());
/// ```
pub fn validate_money(value: &str) -> ValidationResult<Money> {
    Money::parse(value)
}

/// Validates an availability window.
///
/// Fails only when both bounds are present and `end` is strictly before
/// `start`. A zero-length window is allowed.
pub fn validate_date_order(
    start: Option<&DateTime<Utc>>,
    end: Option<&DateTime<Utc>>,
) -> ValidationResult<()> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(ValidationError::StartEndDate),
        _ => Ok(()),
    }
}

/// Rejects ingredient names containing the list delimiter.
pub fn validate_ingredients(ingredients: &[String]) -> ValidationResult<()> {
    match ingredients
        .iter()
        .find(|ingredient| ingredient.contains(INGREDIENT_DELIMITER))
    {
        Some(bad) => Err(ValidationError::IngredientDelimiter(bad.clone())),
        None => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
