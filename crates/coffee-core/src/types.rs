//! # Domain Types
//!
//! Core domain types used throughout the drink catalog.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐          ┌──────────────────────────┐         │
//! │  │       Drink         │          │       SearchPage         │         │
//! │  │  ─────────────────  │          │  ──────────────────────  │         │
//! │  │  id (UUID, server)  │  hits    │  offset_previous         │         │
//! │  │  name               │◄─────────│  offset_current          │         │
//! │  │  price  "D.CC"      │          │  hits: [Drink]           │         │
//! │  │  start / end        │          └──────────────────────────┘         │
//! │  │  ingredients [..]   │                                               │
//! │  └─────────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::search::DrinkSearchSpec;
use crate::validation::{validate_date_order, validate_ingredients, validate_money};

// =============================================================================
// Drink
// =============================================================================

/// A drink on the menu.
///
/// `id` is assigned by the repository on create. It is never read from a
/// request body, so a client cannot choose or overwrite it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Drink {
    /// Unique identifier (UUID v4), absent until persisted.
    #[serde(skip_deserializing)]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub id: Option<String>,

    /// Display name; search matches it exactly.
    #[serde(default)]
    pub name: String,

    /// Price as `D.CC` text.
    #[serde(default)]
    pub price: String,

    /// Start of the availability window.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub start: Option<DateTime<Utc>>,

    /// End of the availability window.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub end: Option<DateTime<Utc>>,

    /// Ingredient names, owned by this drink.
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl Drink {
    /// Creates an unsaved drink with no window and no ingredients.
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Drink {
            name: name.into(),
            price: price.into(),
            ..Default::default()
        }
    }

    /// Sets the availability window.
    pub fn with_window(mut self, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Sets the ingredient list.
    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    /// Checks the sanity of the drink before it is persisted.
    ///
    /// ## Order
    /// 1. price (`CoreError::InvalidPrice`)
    /// 2. start/end ordering
    /// 3. ingredient names
    ///
    /// The first failing check is returned.
    pub fn validate(&self) -> CoreResult<()> {
        validate_money(&self.price).map_err(CoreError::InvalidPrice)?;
        validate_date_order(self.start.as_ref(), self.end.as_ref())?;
        validate_ingredients(&self.ingredients)?;
        Ok(())
    }
}

// =============================================================================
// Search Page
// =============================================================================

/// One page of search results.
///
/// `offset_current` is where the next page starts:
/// `offset_previous + hits.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SearchPage {
    /// Offset this page was requested with (0 when none was given).
    pub offset_previous: i64,

    /// Offset of the next page.
    pub offset_current: i64,

    /// Matching drinks in creation order.
    pub hits: Vec<Drink>,
}

impl SearchPage {
    /// Wraps the result of a search.
    pub fn new(spec: &DrinkSearchSpec, hits: Vec<Drink>) -> Self {
        let offset_previous = spec.offset.unwrap_or(0);
        SearchPage {
            offset_previous,
            offset_current: offset_previous + hits.len() as i64,
            hits,
        }
    }
}

// =============================================================================
// Timestamps
// =============================================================================

/// Storage format for timestamps.
///
/// Fixed width and always UTC, so comparing two stored values as text gives
/// the same answer as comparing them as instants.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Formats a timestamp for storage or for a bound query parameter.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses an RFC 3339 timestamp with any offset into UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_validate_ok() {
        let drink = Drink::new("Latte", "4.50")
            .with_window(Some(at(8)), Some(at(20)))
            .with_ingredients(["milk", "espresso"]);
        assert!(drink.validate().is_ok());
    }

    #[test]
    fn test_validate_money_checked_before_dates() {
        let drink = Drink::new("Latte", "4.5").with_window(Some(at(20)), Some(at(8)));
        let err = drink.validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidPrice(ValidationError::MoneyCentParse)));
    }

    #[test]
    fn test_validate_end_before_start() {
        let drink = Drink::new("Latte", "4.50").with_window(Some(at(20)), Some(at(8)));
        let err = drink.validate().unwrap_err();
        assert!(matches!(err.validation(), ValidationError::StartEndDate));
    }

    #[test]
    fn test_validate_ingredient_with_delimiter() {
        let drink = Drink::new("Latte", "4.50").with_ingredients(["milk, steamed"]);
        let err = drink.validate().unwrap_err();
        assert!(matches!(err.validation(), ValidationError::IngredientDelimiter(_)));
    }

    #[test]
    fn test_deserialize_ignores_client_id() {
        let drink: Drink = serde_json::from_str(
            r#"{"id":"client-chosen","name":"Mocha","price":"5.00",
                "start":"2024-05-01T10:00:00+02:00","ingredients":["cocoa"]}"#,
        )
        .unwrap();

        assert_eq!(drink.id, None);
        assert_eq!(drink.name, "Mocha");
        assert_eq!(drink.start, Some(at(8)));
        assert_eq!(drink.end, None);
        assert_eq!(drink.ingredients, vec!["cocoa".to_string()]);
    }

    #[test]
    fn test_serialize_skips_missing_id() {
        let json = serde_json::to_value(Drink::new("Tea", "2.00")).unwrap();
        assert!(json.get("id").is_none());

        let mut stored = Drink::new("Tea", "2.00");
        stored.id = Some("a1".to_string());
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["id"], "a1");
        assert_eq!(json["start"], serde_json::Value::Null);
        assert_eq!(json["ingredients"], serde_json::json!([]));
    }

    #[test]
    fn test_search_page_offsets() {
        let spec = DrinkSearchSpec {
            offset: Some(2),
            ..Default::default()
        };
        let page = SearchPage::new(&spec, vec![Drink::new("a", "1.00"), Drink::new("b", "1.00")]);
        assert_eq!(page.offset_previous, 2);
        assert_eq!(page.offset_current, 4);

        let page = SearchPage::new(&DrinkSearchSpec::default(), Vec::new());
        assert_eq!(page.offset_previous, 0);
        assert_eq!(page.offset_current, 0);
    }

    #[test]
    fn test_timestamp_format_is_utc_and_fixed_width() {
        let ts = parse_timestamp("2024-05-01T10:30:15.250+02:00").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-05-01T08:30:15Z");
        assert_eq!(format_timestamp(&at(9)).len(), format_timestamp(&at(23)).len());
        assert!(parse_timestamp("yesterday").is_err());
    }
}
