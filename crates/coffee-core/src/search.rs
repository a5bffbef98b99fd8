//! # Drink Search Parameters
//!
//! Turns the untyped key/value pairs of a search request into a
//! [`DrinkSearchSpec`].
//!
//! ## Parameters
//! ```text
//! ┌─────────────┬───────────────────────────────┬────────────────────────────┐
//! │ key         │ effect                        │ failure                    │
//! ├─────────────┼───────────────────────────────┼────────────────────────────┤
//! │ name        │ exact name match              │ -                          │
//! │ date        │ RFC 3339 instant inside the   │ DateParse                  │
//! │             │ drink's [start, end] window   │                            │
//! │ offset      │ rows to skip, >= 0            │ OffsetParse/OffsetNegative │
//! │ limit       │ max rows, >= 0                │ LimitParse/LimitNegative   │
//! │ ingredients │ "a,b,c": any of these         │ -                          │
//! └─────────────┴───────────────────────────────┴────────────────────────────┘
//! ```
//!
//! Keys are checked in the order above and the first error is returned.
//! A missing key and a key with an empty value both mean "not provided".

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::types::parse_timestamp;
use crate::INGREDIENT_DELIMITER;

/// Typed drink search filters. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrinkSearchSpec {
    /// Exact drink name.
    pub name: Option<String>,

    /// Instant that must fall inside the drink's availability window.
    pub date: Option<DateTime<Utc>>,

    /// Number of drinks to skip.
    pub offset: Option<i64>,

    /// Maximum number of drinks to return.
    pub limit: Option<i64>,

    /// Drinks having at least one of these ingredients.
    pub ingredients: Option<Vec<String>>,
}

impl DrinkSearchSpec {
    /// Builds a spec from raw request parameters.
    ///
    /// When a key repeats, its first occurrence is used, matching how a query
    /// string is read as a map.
    ///
    /// ## Example
    /// ```rust
    /// use coffee_core::search::DrinkSearchSpec;
    ///
    /// let spec = DrinkSearchSpec::from_params([
    ///     ("ingredients", "milk,sugar"),
    ///     ("offset", "20"),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(spec.offset, Some(20));
    /// assert_eq!(
    ///     spec.ingredients,
    ///     Some(vec!["milk".to_string(), "sugar".to_string()])
    /// );
    ///
    /// assert!(DrinkSearchSpec::from_params([("limit", "-1")]).is_err());
    /// ```
    pub fn from_params<I, K, V>(params: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut values: HashMap<String, String> = HashMap::new();
        for (key, value) in params {
            values
                .entry(key.as_ref().to_string())
                .or_insert_with(|| value.as_ref().to_string());
        }
        let get = |key: &str| lookup(&values, key);

        let mut spec = DrinkSearchSpec::default();

        if let Some(name) = get("name") {
            spec.name = Some(name.to_string());
        }

        if let Some(date) = get("date") {
            let parsed = parse_timestamp(date).map_err(|source| ValidationError::DateParse {
                value: date.to_string(),
                source,
            })?;
            spec.date = Some(parsed);
        }

        if let Some(offset) = get("offset") {
            let parsed: i64 = offset.parse().map_err(|source| ValidationError::OffsetParse {
                value: offset.to_string(),
                source,
            })?;
            if parsed < 0 {
                return Err(ValidationError::OffsetNegative);
            }
            spec.offset = Some(parsed);
        }

        if let Some(limit) = get("limit") {
            let parsed: i64 = limit.parse().map_err(|source| ValidationError::LimitParse {
                value: limit.to_string(),
                source,
            })?;
            if parsed < 0 {
                return Err(ValidationError::LimitNegative);
            }
            spec.limit = Some(parsed);
        }

        if let Some(ingredients) = get("ingredients") {
            spec.ingredients = Some(
                ingredients
                    .split(INGREDIENT_DELIMITER)
                    .map(str::to_string)
                    .collect(),
            );
        }

        Ok(spec)
    }

    /// Ingredient filter values, if the filter applies.
    ///
    /// An empty list is treated the same as no filter.
    pub fn ingredient_filter(&self) -> Option<&[String]> {
        self.ingredients
            .as_deref()
            .filter(|ingredients| !ingredients.is_empty())
    }
}

fn lookup<'a>(values: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    values
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

// =============================================================================
// Unit Tests
// =============================================================================
