//! HTTP handlers for the drink catalog.
//!
//! Each handler decodes its input, runs validation from `coffee-core`, and
//! hands off to the drink repository. Failures become [`ApiError`]s.

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use coffee_core::{Drink, DrinkSearchSpec, SearchPage};
use coffee_db::DbError;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Raw query pairs in request order, so a repeated key keeps its first value.
type QueryPairs = Vec<(String, String)>;

/// `POST /drink`
///
/// The body is decoded as JSON whatever its `Content-Type`. Any `id` in it
/// is ignored; the repository assigns one.
pub async fn create_drink(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<Value>> {
    let body = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let drink: Drink =
        serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    drink.validate()?;

    let id = state.db.drinks().create(&drink).await?;
    info!(id = %id, name = %drink.name, "Drink created");

    Ok(Json(json!({ "id": id })))
}

/// `DELETE /drink?id=<id>`
///
/// Deleting an id that does not exist still succeeds.
pub async fn delete_drink(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let Query(pairs) = query.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let id = pairs
        .iter()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.as_str())
        .unwrap_or_default();
    if id.is_empty() {
        return Err(DbError::MissingId.into());
    }

    state.db.drinks().delete(id).await?;
    info!(id = %id, "Drink deleted");

    Ok(Json(json!({ "status": "success" })))
}

/// `GET /drinks`
pub async fn search_drinks(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> ApiResult<Json<SearchPage>> {
    let Query(pairs) = query.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let spec = DrinkSearchSpec::from_params(pairs)?;
    let hits = state.db.drinks().search(&spec).await?;

    Ok(Json(SearchPage::new(&spec, hits)))
}

/// `GET /health`
///
/// - `200 OK` - the database answers queries and every migration is applied
/// - `503 Service Unavailable` - it does not answer, or migrations are pending
pub async fn health(State(state): State<AppState>) -> Response {
    if !state.db.health_check().await {
        warn!("Health check failed: database unavailable");
        return unavailable(json!({ "status": "unavailable" }));
    }

    match state.db.migration_status().await {
        Ok((total, applied)) if applied >= total => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "migrations": { "total": total, "applied": applied }
            })),
        )
            .into_response(),
        Ok((total, applied)) => {
            warn!(total, applied, "Health check failed: migrations pending");
            unavailable(json!({
                "status": "migrating",
                "migrations": { "total": total, "applied": applied }
            }))
        }
        Err(e) => {
            warn!(error = %e, "Health check failed: migration status unknown");
            unavailable(json!({ "status": "unavailable" }))
        }
    }
}

fn unavailable(body: Value) -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
}

// =============================================================================
// Unit Tests
// =============================================================================
