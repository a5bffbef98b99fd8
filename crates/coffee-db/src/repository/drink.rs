//! # Drink Repository
//!
//! Database operations for drinks and their ingredients.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create(drink)                                        │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    INSERT INTO drinks (id, name, price, start, "end", created_at)       │
//! │    INSERT INTO drinks_ingredients VALUES (id, a), (id, b), ...          │
//! │      (repeated per batch of INGREDIENT_INSERT_BATCH rows)               │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any `?` before COMMIT drops the sqlx::Transaction, which rolls back.  │
//! │  Either both tables change or neither does.                            │
//! │                                                                         │
//! │                    delete(id)                                           │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    DELETE FROM drinks WHERE id = ?                                      │
//! │    DELETE FROM drinks_ingredients WHERE drink_id = ?                    │
//! │  COMMIT                         (0 rows affected is still success)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use coffee_core::{format_timestamp, parse_timestamp, Drink, DrinkSearchSpec, INGREDIENT_DELIMITER};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult, DbResultExt};
use crate::query::{build_get_query, build_search_query};

/// Rows per ingredient `INSERT`; each row binds two variables, well under
/// SQLite's per-statement variable limit.
const INGREDIENT_INSERT_BATCH: usize = 500;

/// Repository for drink database operations.
#[derive(Debug, Clone)]
pub struct DrinkRepository {
    pool: SqlitePool,
}

impl DrinkRepository {
    /// Creates a new DrinkRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DrinkRepository { pool }
    }

    /// Inserts a drink and its ingredients atomically.
    ///
    /// The drink is expected to have passed [`Drink::validate`]. Any `id`
    /// already on it is ignored; a fresh one is generated.
    ///
    /// ## Returns
    /// The id assigned to the new drink.
    pub async fn create(&self, drink: &Drink) -> DbResult<String> {
        let id = generate_drink_id();
        let start = drink.start.as_ref().map(format_timestamp);
        let end = drink.end.as_ref().map(format_timestamp);
        let created_at = format_timestamp(&Utc::now());

        debug!(
            id = %id,
            name = %drink.name,
            ingredients = drink.ingredients.len(),
            "Creating drink"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed initializing transaction")?;

        sqlx::query(
            r#"
            INSERT INTO drinks (
                id, name, price, start, "end", created_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6
            )
            "#,
        )
        .bind(id.as_str())
        .bind(drink.name.as_str())
        .bind(drink.price.as_str())
        .bind(start)
        .bind(end)
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .context("Drink insert failed")?;

        for batch in drink.ingredients.chunks(INGREDIENT_INSERT_BATCH) {
            let mut insert: QueryBuilder<Sqlite> =
                QueryBuilder::new("INSERT INTO drinks_ingredients (drink_id, ingredient) ");
            insert.push_values(batch, |mut row, ingredient| {
                row.push_bind(id.as_str()).push_bind(ingredient.as_str());
            });

            insert
                .build()
                .execute(&mut *tx)
                .await
                .context("Drink-Ingredient insert failed")?;
        }

        tx.commit().await.context("Drink commit failed")?;

        debug!(id = %id, "Drink created");
        Ok(id)
    }

    /// Deletes a drink and its ingredient rows atomically.
    ///
    /// ## Returns
    /// * `Ok(())` - Deleted, or there was nothing to delete
    /// * `Err(DbError::MissingId)` - `id` is empty
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        if id.is_empty() {
            return Err(DbError::MissingId);
        }

        debug!(id = %id, "Deleting drink");

        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed initializing transaction")?;

        let drinks_deleted = sqlx::query("DELETE FROM drinks WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("Failed deleting from the drinks table")?
            .rows_affected();

        let ingredients_deleted = sqlx::query("DELETE FROM drinks_ingredients WHERE drink_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("Failed deleting from the drinks-ingredients table")?
            .rows_affected();

        tx.commit().await.context("Drink delete commit failed")?;

        debug!(
            id = %id,
            drinks_deleted,
            ingredients_deleted,
            "Drink deleted"
        );
        Ok(())
    }

    /// Searches drinks matching `spec`, in creation order.
    ///
    /// Returns an empty list when nothing matches.
    pub async fn search(&self, spec: &DrinkSearchSpec) -> DbResult<Vec<Drink>> {
        debug!(?spec, "Searching drinks");

        let mut query = build_search_query(spec);
        let rows: Vec<DrinkRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .context("Failed querying drinks")?;

        let drinks = rows
            .into_iter()
            .map(DrinkRow::into_drink)
            .collect::<DbResult<Vec<_>>>()
            .context("Failed reading a drink row")?;

        debug!(count = drinks.len(), "Search returned drinks");
        Ok(drinks)
    }

    /// Gets a drink by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Drink))` - Drink found
    /// * `Ok(None)` - Drink not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Drink>> {
        let mut query = build_get_query(id);
        let row: Option<DrinkRow> = query
            .build_query_as()
            .fetch_optional(&self.pool)
            .await
            .context("Failed fetching drink")?;

        row.map(DrinkRow::into_drink).transpose()
    }

    /// Counts stored drinks (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM drinks")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new drink ID.
pub fn generate_drink_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Row Mapping
// =============================================================================

/// One row of the search query, before conversion into a [`Drink`].
#[derive(Debug, sqlx::FromRow)]
struct DrinkRow {
    id: String,
    name: String,
    price: String,
    start_at: Option<String>,
    end_at: Option<String>,
    /// `GROUP_CONCAT` over zero ingredient rows is NULL, not "".
    ingredients: Option<String>,
}

impl DrinkRow {
    fn into_drink(self) -> DbResult<Drink> {
        let start = parse_column(&self.id, "start", self.start_at)?;
        let end = parse_column(&self.id, "end", self.end_at)?;

        // Some("") is one empty-named ingredient, not an empty list
        let ingredients = match self.ingredients {
            Some(joined) => joined
                .split(INGREDIENT_DELIMITER)
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        };

        Ok(Drink {
            id: Some(self.id),
            name: self.name,
            price: self.price,
            start,
            end,
            ingredients,
        })
    }
}

fn parse_column(
    id: &str,
    column: &'static str,
    value: Option<String>,
) -> DbResult<Option<chrono::DateTime<Utc>>> {
    value
        .map(|value| {
            parse_timestamp(&value).map_err(|_| DbError::Corrupt {
                id: id.to_string(),
                column,
                value,
            })
        })
        .transpose()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::{DateTime, TimeZone};
    use std::collections::HashSet;

    async fn repo() -> (Database, DrinkRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.drinks();
        (db, repo)
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap()
    }

    fn set(values: &[String]) -> HashSet<&str> {
        values.iter().map(String::as_str).collect()
    }

    fn names(drinks: &[Drink]) -> Vec<&str> {
        drinks.iter().map(|d| d.name.as_str()).collect()
    }

    async fn ingredient_rows(db: &Database, id: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM drinks_ingredients WHERE drink_id = ?1")
            .bind(id)
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (_db, repo) = repo().await;
        let drink = Drink::new("Latte", "4.50")
            .with_window(Some(at(7)), Some(at(11)))
            .with_ingredients(["espresso", "milk"]);

        let id = repo.create(&drink).await.unwrap();
        assert!(!id.is_empty());

        let stored = repo.get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.id.as_deref(), Some(id.as_str()));
        assert_eq!(stored.name, "Latte");
        assert_eq!(stored.price, "4.50");
        assert_eq!(stored.start, Some(at(7)));
        assert_eq!(stored.end, Some(at(11)));
        assert_eq!(set(&stored.ingredients), HashSet::from(["espresso", "milk"]));

        assert!(repo.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_ignores_existing_id() {
        let (_db, repo) = repo().await;
        let mut drink = Drink::new("Tea", "2.00");
        drink.id = Some("chosen".to_string());

        let id = repo.create(&drink).await.unwrap();
        assert_ne!(id, "chosen");
    }

    #[tokio::test]
    async fn test_no_ingredients_reads_back_empty() {
        let (_db, repo) = repo().await;
        let id = repo.create(&Drink::new("Water", "0.00")).await.unwrap();

        let stored = repo.get_by_id(&id).await.unwrap().unwrap();
        assert!(stored.ingredients.is_empty());
        assert_eq!(stored.start, None);
        assert_eq!(stored.end, None);
    }

    #[tokio::test]
    async fn test_search_by_ingredient_returns_drink_once_with_all_ingredients() {
        let (_db, repo) = repo().await;
        let id = repo
            .create(&Drink::new("Sweet Milk", "1.50").with_ingredients(["milk", "sugar"]))
            .await
            .unwrap();

        let spec = DrinkSearchSpec::from_params([("ingredients", "milk")]).unwrap();
        let hits = repo.search(&spec).await.unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_deref(), Some(id.as_str()));
        assert_eq!(set(&hits[0].ingredients), HashSet::from(["milk", "sugar"]));
    }

    #[tokio::test]
    async fn test_ingredient_filter_is_any_match() {
        let (_db, repo) = repo().await;
        repo.create(&Drink::new("A", "1.00").with_ingredients(["milk"])).await.unwrap();
        repo.create(&Drink::new("B", "1.00").with_ingredients(["sugar", "lemon"])).await.unwrap();
        repo.create(&Drink::new("C", "1.00").with_ingredients(["tea"])).await.unwrap();
        repo.create(&Drink::new("D", "1.00").with_ingredients(["milk", "sugar"])).await.unwrap();

        let spec = DrinkSearchSpec::from_params([("ingredients", "milk,sugar")]).unwrap();
        let hits = repo.search(&spec).await.unwrap();

        assert_eq!(names(&hits), vec!["A", "B", "D"]);
        assert_eq!(set(&hits[1].ingredients), HashSet::from(["sugar", "lemon"]));
    }

    #[tokio::test]
    async fn test_search_empty_store() {
        let (_db, repo) = repo().await;
        let hits = repo.search(&DrinkSearchSpec::default()).await.unwrap();
        assert!(hits.is_empty());

        let spec = DrinkSearchSpec::from_params([("name", "Nothing"), ("ingredients", "x")]).unwrap();
        assert!(repo.search(&spec).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_by_name_is_exact() {
        let (_db, repo) = repo().await;
        repo.create(&Drink::new("Latte", "4.00")).await.unwrap();
        repo.create(&Drink::new("Iced Latte", "4.50")).await.unwrap();

        let spec = DrinkSearchSpec::from_params([("name", "Latte")]).unwrap();
        assert_eq!(names(&repo.search(&spec).await.unwrap()), vec!["Latte"]);

        let spec = DrinkSearchSpec::from_params([("name", "latte")]).unwrap();
        assert!(repo.search(&spec).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pagination_in_creation_order() {
        let (_db, repo) = repo().await;
        for n in 1..=5 {
            repo.create(&Drink::new(format!("Drink {}", n), "1.00")).await.unwrap();
        }

        let spec = DrinkSearchSpec::from_params([("offset", "2"), ("limit", "2")]).unwrap();
        let hits = repo.search(&spec).await.unwrap();
        assert_eq!(names(&hits), vec!["Drink 3", "Drink 4"]);

        let page = coffee_core::SearchPage::new(&spec, hits);
        assert_eq!(page.offset_current, 4);

        let spec = DrinkSearchSpec::from_params([("offset", "3")]).unwrap();
        assert_eq!(names(&repo.search(&spec).await.unwrap()), vec!["Drink 4", "Drink 5"]);

        let spec = DrinkSearchSpec::from_params([("limit", "0")]).unwrap();
        assert!(repo.search(&spec).await.unwrap().is_empty());

        let all = repo.search(&DrinkSearchSpec::default()).await.unwrap();
        assert_eq!(
            names(&all),
            vec!["Drink 1", "Drink 2", "Drink 3", "Drink 4", "Drink 5"]
        );
    }

    #[tokio::test]
    async fn test_pagination_counts_drinks_not_joined_rows() {
        let (_db, repo) = repo().await;
        repo.create(&Drink::new("First", "1.00").with_ingredients(["a", "b", "c"])).await.unwrap();
        repo.create(&Drink::new("Second", "1.00").with_ingredients(["a", "b"])).await.unwrap();

        let spec = DrinkSearchSpec::from_params([("limit", "1"), ("ingredients", "a,b")]).unwrap();
        let hits = repo.search(&spec).await.unwrap();
        assert_eq!(names(&hits), vec!["First"]);
        assert_eq!(hits[0].ingredients.len(), 3);
    }

    #[tokio::test]
    async fn test_date_filter_inclusive_window() {
        let (_db, repo) = repo().await;
        repo.create(&Drink::new("Morning", "1.00").with_window(Some(at(8)), Some(at(12))))
            .await
            .unwrap();
        repo.create(&Drink::new("Afternoon", "1.00").with_window(Some(at(12)), Some(at(16))))
            .await
            .unwrap();
        repo.create(&Drink::new("From Noon", "1.00").with_window(Some(at(12)), None))
            .await
            .unwrap();
        repo.create(&Drink::new("Until Noon", "1.00").with_window(None, Some(at(12))))
            .await
            .unwrap();
        repo.create(&Drink::new("Always", "1.00")).await.unwrap();

        let search_at = |hour: u32| DrinkSearchSpec {
            date: Some(at(hour)),
            ..Default::default()
        };

        assert_eq!(
            names(&repo.search(&search_at(12)).await.unwrap()),
            vec!["Morning", "Afternoon"]
        );
        assert_eq!(names(&repo.search(&search_at(8)).await.unwrap()), vec!["Morning"]);
        assert_eq!(names(&repo.search(&search_at(16)).await.unwrap()), vec!["Afternoon"]);
        assert!(repo.search(&search_at(20)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_date_filter_with_offset_input() {
        let (_db, repo) = repo().await;
        repo.create(&Drink::new("Morning", "1.00").with_window(Some(at(8)), Some(at(12))))
            .await
            .unwrap();

        // 13:00+02:00 is 11:00Z
        let spec = DrinkSearchSpec::from_params([("date", "2024-06-01T13:00:00+02:00")]).unwrap();
        assert_eq!(names(&repo.search(&spec).await.unwrap()), vec!["Morning"]);
    }

    #[tokio::test]
    async fn test_combined_filters() {
        let (_db, repo) = repo().await;
        repo.create(
            &Drink::new("Latte", "4.00")
                .with_window(Some(at(6)), Some(at(10)))
                .with_ingredients(["milk"]),
        )
        .await
        .unwrap();
        repo.create(
            &Drink::new("Latte", "4.00")
                .with_window(Some(at(14)), Some(at(18)))
                .with_ingredients(["milk"]),
        )
        .await
        .unwrap();
        repo.create(
            &Drink::new("Latte", "4.00")
                .with_window(Some(at(6)), Some(at(10)))
                .with_ingredients(["oat"]),
        )
        .await
        .unwrap();

        let spec = DrinkSearchSpec {
            name: Some("Latte".to_string()),
            date: Some(at(9)),
            ingredients: Some(vec!["milk".to_string()]),
            ..Default::default()
        };
        let hits = repo.search(&spec).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].start, Some(at(6)));
        assert_eq!(hits[0].ingredients, vec!["milk".to_string()]);
    }

    #[tokio::test]
    async fn test_hostile_values_are_matched_literally() {
        let (db, repo) = repo().await;
        let name = "x'; DROP TABLE drinks; --";
        let ingredient = "') OR 1=1 --";
        repo.create(&Drink::new(name, "1.00").with_ingredients([ingredient])).await.unwrap();
        repo.create(&Drink::new("Plain", "1.00")).await.unwrap();

        let spec = DrinkSearchSpec {
            name: Some(name.to_string()),
            ..Default::default()
        };
        assert_eq!(names(&repo.search(&spec).await.unwrap()), vec![name]);

        let spec = DrinkSearchSpec {
            ingredients: Some(vec![ingredient.to_string()]),
            ..Default::default()
        };
        assert_eq!(names(&repo.search(&spec).await.unwrap()), vec![name]);

        assert_eq!(db.drinks().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_delete_removes_both_tables() {
        let (db, repo) = repo().await;
        let id = repo
            .create(&Drink::new("Mocha", "5.00").with_ingredients(["cocoa", "milk"]))
            .await
            .unwrap();
        assert_eq!(ingredient_rows(&db, &id).await, 2);

        repo.delete(&id).await.unwrap();

        assert!(repo.get_by_id(&id).await.unwrap().is_none());
        assert_eq!(ingredient_rows(&db, &id).await, 0);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_drink_is_ok() {
        let (_db, repo) = repo().await;
        repo.delete("00000000-0000-0000-0000-000000000000").await.unwrap();
        repo.delete("not-even-a-uuid").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_without_id() {
        let (_db, repo) = repo().await;
        let err = repo.delete("").await.unwrap_err();
        assert!(matches!(err, DbError::MissingId));
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let (_db, repo) = repo().await;
        let a = Drink::new("A", "1.00").with_ingredients(["x"]);
        let b = Drink::new("B", "1.00").with_ingredients(["x"]);

        let (id_a, id_b) = tokio::join!(repo.create(&a), repo.create(&b));
        let (id_a, id_b) = (id_a.unwrap(), id_b.unwrap());

        assert_ne!(id_a, id_b);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_failed_ingredient_insert_rolls_back_drink() {
        let (db, repo) = repo().await;
        sqlx::query(
            "CREATE TRIGGER reject_poison BEFORE INSERT ON drinks_ingredients
             WHEN NEW.ingredient = 'poison'
             BEGIN SELECT RAISE(ABORT, 'poisoned ingredient'); END",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let err = repo
            .create(&Drink::new("Bad", "1.00").with_ingredients(["milk", "poison"]))
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("Drink-Ingredient insert failed"));
        assert_eq!(repo.count().await.unwrap(), 0);

        let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM drinks_ingredients")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(orphans, 0);

        // the pool is still usable after the rollback
        repo.create(&Drink::new("Good", "1.00").with_ingredients(["milk"])).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_ingredient_name_survives_round_trip() {
        let (db, repo) = repo().await;
        let drink = Drink::new("Blank", "1.00").with_ingredients([""]);
        drink.validate().unwrap();

        let id = repo.create(&drink).await.unwrap();
        assert_eq!(ingredient_rows(&db, &id).await, 1);

        let stored = repo.get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.ingredients, vec![String::new()]);

        let mixed = repo
            .create(&Drink::new("Mixed", "1.00").with_ingredients(["", "milk"]))
            .await
            .unwrap();
        let stored = repo.get_by_id(&mixed).await.unwrap().unwrap();
        assert_eq!(set(&stored.ingredients), HashSet::from(["", "milk"]));
    }

    #[tokio::test]
    async fn test_create_with_more_ingredients_than_bind_limit() {
        let (db, repo) = repo().await;
        let ingredients: Vec<String> = (0..20_000).map(|n| format!("i{}", n)).collect();

        let id = repo
            .create(&Drink::new("Everything", "9.99").with_ingredients(ingredients.clone()))
            .await
            .unwrap();

        assert_eq!(ingredient_rows(&db, &id).await, 20_000);
        let stored = repo.get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.ingredients.len(), 20_000);
        assert_eq!(set(&stored.ingredients), set(&ingredients));
    }

    #[tokio::test]
    async fn test_failed_later_batch_rolls_back_earlier_batches() {
        let (db, repo) = repo().await;
        sqlx::query(
            "CREATE TRIGGER reject_last BEFORE INSERT ON drinks_ingredients
             WHEN NEW.ingredient = 'last'
             BEGIN SELECT RAISE(ABORT, 'rejected'); END",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let mut ingredients: Vec<String> = (0..1_200).map(|n| format!("i{}", n)).collect();
        ingredients.push("last".to_string());

        assert!(repo
            .create(&Drink::new("Big", "1.00").with_ingredients(ingredients))
            .await
            .is_err());

        assert_eq!(repo.count().await.unwrap(), 0);
        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM drinks_ingredients")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(rows, 0);
    }

    #[tokio::test]
    async fn test_search_with_more_filter_values_than_bind_limit() {
        let (_db, repo) = repo().await;
        let id = repo
            .create(&Drink::new("Latte", "4.00").with_ingredients(["milk", "espresso"]))
            .await
            .unwrap();
        repo.create(&Drink::new("Tea", "2.00").with_ingredients(["leaves"]))
            .await
            .unwrap();

        let mut wanted: Vec<String> = (0..40_000).map(|n| format!("x{}", n)).collect();
        wanted.push("milk".to_string());
        let spec = DrinkSearchSpec {
            ingredients: Some(wanted),
            ..Default::default()
        };

        let hits = repo.search(&spec).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_deref(), Some(id.as_str()));
    }

    #[tokio::test]
    async fn test_ingredient_filter_values_with_json_characters() {
        let (_db, repo) = repo().await;
        let odd = r#"say "hi" \ [x]"#;
        repo.create(&Drink::new("Odd", "1.00").with_ingredients([odd])).await.unwrap();

        let spec = DrinkSearchSpec {
            ingredients: Some(vec![odd.to_string()]),
            ..Default::default()
        };
        assert_eq!(names(&repo.search(&spec).await.unwrap()), vec!["Odd"]);
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_both_tables_unchanged() {
        let (db, repo) = repo().await;
        let id = repo
            .create(&Drink::new("Locked", "3.00").with_ingredients(["milk", "pinned"]))
            .await
            .unwrap();

        sqlx::query(
            "CREATE TRIGGER keep_pinned BEFORE DELETE ON drinks_ingredients
             WHEN OLD.ingredient = 'pinned'
             BEGIN SELECT RAISE(ABORT, 'pinned ingredient'); END",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let err = repo.delete(&id).await.unwrap_err();
        assert!(err.to_string().starts_with("Failed deleting from the"));

        let stored = repo.get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(set(&stored.ingredients), HashSet::from(["milk", "pinned"]));
        assert_eq!(ingredient_rows(&db, &id).await, 2);
        assert_eq!(repo.count().await.unwrap(), 1);

        // the pool is still usable after the rollback
        sqlx::query("DROP TRIGGER keep_pinned").execute(db.pool()).await.unwrap();
        repo.delete(&id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_timestamp_is_reported() {
        let (db, repo) = repo().await;
        sqlx::query(
            "INSERT INTO drinks (id, name, price, start, created_at)
             VALUES ('bad-row', 'Broken', '1.00', 'someday', '2024-01-01T00:00:00Z')",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let err = repo.search(&DrinkSearchSpec::default()).await.unwrap_err();
        assert!(matches!(err.root(), DbError::Corrupt { column: "start", .. }));
    }
}
