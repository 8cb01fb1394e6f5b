use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use garde::Validate;

use crate::app_state::AppState;
use crate::error::{ApiError, ApiResult};
use crate::models::recipe::{RecipeId, RecipePage, SearchQuery};

/// GET /recipes — search the upstream catalog, one page at a time.
pub async fn list_recipes(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Json<RecipePage>> {
    let Query(query) = query.map_err(|rejection| {
        ApiError::Validation(format!("Invalid search parameters: {}", rejection.body_text()))
    })?;

    query.validate().map_err(|report| {
        tracing::debug!(offset = query.offset, "Rejected search parameters");
        ApiError::Validation(format!(
            "Invalid search parameters: {}",
            report.to_string().trim_end()
        ))
    })?;

    let page = state.catalog.search(&query).await.map_err(|e| {
        if e.is_transport() {
            tracing::error!(error = %e, "Recipe search request failed");
            ApiError::ServiceUnavailable
        } else {
            tracing::error!(error = %e, "Unexpected error during recipe search");
            ApiError::Internal
        }
    })?;

    tracing::info!(
        offset = query.offset,
        returned = page.results.as_array().map_or(0, Vec::len),
        total = %page.total_results,
        "Recipe search completed"
    );

    Ok(Json(page))
}

/// GET /recipe/{id} — full upstream payload for one recipe, passed through as-is.
pub async fn get_recipe(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<serde_json::Value>> {
    let Path(raw_id) = id.map_err(|rejection| {
        ApiError::Validation(format!("Invalid recipe ID: {}", rejection.body_text()))
    })?;

    let recipe_id =
        RecipeId::try_from(raw_id).map_err(|e| ApiError::Validation(e.to_string()))?;

    let recipe = state.catalog.get_by_id(recipe_id).await.map_err(|e| {
        if e.is_transport() {
            tracing::error!(recipe_id = recipe_id.get(), error = %e, "Recipe lookup failed");
            ApiError::Upstream(e.to_string())
        } else {
            tracing::error!(
                recipe_id = recipe_id.get(),
                error = %e,
                "Unexpected error during recipe lookup"
            );
            ApiError::Internal
        }
    })?;

    Ok(Json(recipe))
}
