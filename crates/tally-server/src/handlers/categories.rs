//! Category handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{audit, caller_of, read_json, AppError, AppState, SuccessResponse};
use tally_core::models::{Category, CategoryType, CategoryUpdate, NewCategory};

/// Query parameters for listing categories
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    #[serde(rename = "type")]
    pub category_type: Option<CategoryType>,
}

/// GET /api/categories - List the caller's categories
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CategoryQuery>,
    request: Request,
) -> Result<Json<Vec<Category>>, AppError> {
    let caller = caller_of(&request);
    let categories = state
        .tracker
        .get_user_categories(caller.id(), params.category_type)?;
    Ok(Json(categories))
}

/// GET /api/categories/:id - Get one category
pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<Category>, AppError> {
    let caller = caller_of(&request);
    Ok(Json(state.tracker.get_category(caller.id(), id)?))
}

/// POST /api/categories - Create a custom category
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Category>, AppError> {
    let caller = caller_of(&request);
    let req: NewCategory = read_json(request).await?;

    let id = state.tracker.create_category(caller.id(), &req)?;
    audit(
        &state,
        &caller,
        "create",
        "category",
        Some(id),
        Some(&format!("name={}", req.name)),
    )?;

    Ok(Json(state.tracker.get_category(caller.id(), id)?))
}

/// PUT /api/categories/:id - Rename or restyle a category
pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<Category>, AppError> {
    let caller = caller_of(&request);
    let req: CategoryUpdate = read_json(request).await?;

    state.tracker.update_category(caller.id(), id, &req)?;
    audit(&state, &caller, "update", "category", Some(id), None)?;

    Ok(Json(state.tracker.get_category(caller.id(), id)?))
}

/// DELETE /api/categories/:id - Delete a custom category
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let caller = caller_of(&request);

    state.tracker.delete_category(caller.id(), id)?;
    audit(&state, &caller, "delete", "category", Some(id), None)?;

    Ok(Json(SuccessResponse { success: true }))
}

/// Response for seeding default categories
#[derive(Serialize)]
pub struct SeedResponse {
    pub created: usize,
}

/// POST /api/categories/defaults - Seed default categories (no-op if any exist)
pub async fn seed_categories(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<SeedResponse>, AppError> {
    let caller = caller_of(&request);

    let created = state.tracker.initialize_default_categories(caller.id())?;
    if created > 0 {
        audit(
            &state,
            &caller,
            "seed",
            "category",
            None,
            Some(&format!("count={}", created)),
        )?;
    }

    Ok(Json(SeedResponse { created }))
}
