//! # Drink Search Query Composer
//!
//! Builds the read query behind `GET /drinks` from a [`DrinkSearchSpec`].
//!
//! ## Query Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SELECT d.id, d.name, d.price, d.start, d."end",                        │
//! │         GROUP_CONCAT(DISTINCT di.ingredient)      ← one string per drink │
//! │  FROM drinks d                                                          │
//! │  LEFT JOIN drinks_ingredients di  ON di.drink_id = d.id                 │
//! │                                                                         │
//! │  ┄┄ ingredients=a,b ┄┄                                                  │
//! │  INNER JOIN drinks_ingredients di2                                      │
//! │      ON di2.drink_id = d.id                                             │
//! │     AND di2.ingredient IN (SELECT value FROM json_each(?))              │
//! │                                                                         │
//! │  ┄┄ name / date ┄┄                                                      │
//! │  WHERE d.name = ?  AND  ? BETWEEN d.start AND d."end"                   │
//! │                                                                         │
//! │  GROUP BY d.id            ← joins fan out, collapse back to one row     │
//! │  ORDER BY d.seq ASC       ← creation order                              │
//! │  LIMIT ? OFFSET ?         ← LIMIT -1 when only an offset is given       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every filter value goes through `push_bind`. Only fixed SQL fragments
//! are ever pushed as text. The ingredient list travels as a single JSON
//! array bind, so its length never runs into SQLite's variable limit.

use coffee_core::{format_timestamp, DrinkSearchSpec};
use serde_json::Value;
use sqlx::{QueryBuilder, Sqlite};

/// Columns and joins shared by every drink search.
const SEARCH_SELECT: &str = r#"SELECT
    d.id,
    d.name,
    d.price,
    d.start AS start_at,
    d."end" AS end_at,
    GROUP_CONCAT(DISTINCT di.ingredient) AS ingredients
FROM drinks d
LEFT JOIN drinks_ingredients di ON di.drink_id = d.id"#;

/// SQLite's "no limit" value, needed because OFFSET requires a LIMIT.
const NO_LIMIT: i64 = -1;

/// Builds the single-drink lookup used by `DrinkRepository::get_by_id`.
pub fn build_get_query(id: &str) -> QueryBuilder<'static, Sqlite> {
    let mut query = QueryBuilder::new(SEARCH_SELECT);
    query
        .push("\nWHERE d.id = ")
        .push_bind(id.to_string())
        .push("\nGROUP BY d.id");
    query
}

/// Builds the parameterized search query for `spec`.
///
/// The same spec always yields the same SQL text and bind order.
pub fn build_search_query(spec: &DrinkSearchSpec) -> QueryBuilder<'static, Sqlite> {
    let mut query = QueryBuilder::new(SEARCH_SELECT);

    if let Some(ingredients) = spec.ingredient_filter() {
        // one bound JSON array, however many values were asked for
        query
            .push(
                "\nINNER JOIN drinks_ingredients di2 ON di2.drink_id = d.id \
                 AND di2.ingredient IN (SELECT value FROM json_each(",
            )
            .push_bind(Value::from(ingredients.to_vec()).to_string())
            .push("))");
    }

    let mut filters = Filters::default();

    if let Some(name) = &spec.name {
        filters.next(&mut query);
        query.push("d.name = ").push_bind(name.clone());
    }

    if let Some(date) = &spec.date {
        filters.next(&mut query);
        // NULL start or end makes BETWEEN NULL, so open windows never match
        query
            .push_bind(format_timestamp(date))
            .push(r#" BETWEEN d.start AND d."end""#);
    }

    query.push("\nGROUP BY d.id\nORDER BY d.seq ASC");

    if spec.limit.is_some() || spec.offset.is_some() {
        query
            .push("\nLIMIT ")
            .push_bind(spec.limit.unwrap_or(NO_LIMIT));
        if let Some(offset) = spec.offset {
            query.push(" OFFSET ").push_bind(offset);
        }
    }

    query
}

/// Emits `WHERE` before the first predicate and `AND` before the rest.
#[derive(Default)]
struct Filters {
    count: usize,
}

impl Filters {
    fn next(&mut self, query: &mut QueryBuilder<'static, Sqlite>) {
        query.push(if self.count == 0 { "\nWHERE " } else { " AND " });
        self.count += 1;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
