//! # Error Types
//!
//! Domain-specific error types for coffee-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  coffee-core errors (this file)                                        │
//! │  ├── ValidationError  - One malformed field or search parameter        │
//! │  └── CoreError        - Entity-level failure with context              │
//! │                                                                         │
//! │  coffee-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  HTTP errors (in apps/api)                                             │
//! │  └── ApiError         - What the client sees (status + message)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError (400)                    │
//! │        sqlx::Error → DbError → ApiError (500)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Every variant is a caller mistake: reported back, never retried.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Price is not `<dollars>.<cents>`.
    #[error("Unrecognized format for money")]
    MoneyFormat,

    /// Dollar segment is not an integer.
    #[error("Failed parsing dollar part")]
    MoneyDollarParse,

    /// Cent segment is not a two digit integer in `[0, 99]`.
    #[error("Failed parsing cent part")]
    MoneyCentParse,

    /// Dollar segment is outside `[0, MAX_DOLLAR_AMOUNT]`.
    #[error("Money given is out of accepted range")]
    MoneyAmount,

    /// Availability window ends before it starts.
    #[error("The end date comes before the start date")]
    StartEndDate,

    /// An ingredient contains the list delimiter and could not be searched
    /// or read back as a single value.
    #[error("Ingredient '{0}' must not contain ','")]
    IngredientDelimiter(String),

    /// `date` search parameter is not an RFC 3339 timestamp.
    #[error("Failed parsing date field '{value}' as a drink search parameter")]
    DateParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// `offset` search parameter is not an integer.
    #[error("Failed parsing offset field '{value}' as a drink search parameter")]
    OffsetParse {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// `offset` search parameter is below zero.
    #[error("Offset must be a non-negative integer")]
    OffsetNegative,

    /// `limit` search parameter is not an integer.
    #[error("Failed parsing limit field '{value}' as a drink search parameter")]
    LimitParse {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// `limit` search parameter is below zero.
    #[error("Limit must be a non-negative integer")]
    LimitNegative,
}

// =============================================================================
// Core Error
// =============================================================================

/// Entity-level errors.
///
/// Wraps a [`ValidationError`] with the step that produced it, keeping the
/// inner error as the source.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The drink price failed money validation.
    #[error("Validation for price failed: {0}")]
    InvalidPrice(#[source] ValidationError),

    /// Any other validation failure.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns the underlying validation error.
    pub fn validation(&self) -> &ValidationError {
        match self {
            CoreError::InvalidPrice(err) | CoreError::Validation(err) => err,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
