//! Budget handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    Json,
};
use serde::Deserialize;

use crate::{audit, caller_of, read_json, AppError, AppState, SuccessResponse};
use tally_core::models::{Budget, BudgetWithDetails, SetBudget};
use tally_core::{BudgetWrite, Month};

/// Query parameters for listing budgets
#[derive(Debug, Deserialize)]
pub struct BudgetQuery {
    pub month: Month,
}

/// Query parameters for looking up a single budget
#[derive(Debug, Deserialize)]
pub struct BudgetLookupQuery {
    pub month: Month,
    pub category_id: Option<i64>,
}

/// GET /api/budgets?month=YYYY-MM - Budgets with spending for a month
pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BudgetQuery>,
    request: Request,
) -> Result<Json<Vec<BudgetWithDetails>>, AppError> {
    let caller = caller_of(&request);
    Ok(Json(state.tracker.get_budgets(caller.id(), params.month)?))
}

/// GET /api/budgets/lookup?month=YYYY-MM[&category_id=N] - The row for one
/// category (or the whole-month budget), if set
pub async fn lookup_budget(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BudgetLookupQuery>,
    request: Request,
) -> Result<Json<Budget>, AppError> {
    let caller = caller_of(&request);
    let budget = state
        .tracker
        .get_budget(caller.id(), params.category_id, params.month)?
        .ok_or_else(|| AppError::not_found("Budget not found"))?;
    Ok(Json(budget))
}

/// PUT /api/budgets - Create or update a budget, optionally across future months
pub async fn set_budget(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<BudgetWrite>, AppError> {
    let caller = caller_of(&request);
    let req: SetBudget = read_json(request).await?;

    let write = state.tracker.set_budget(caller.id(), &req)?;
    audit(
        &state,
        &caller,
        if write.inserted { "create" } else { "update" },
        "budget",
        Some(write.id),
        Some(&format!(
            "month={} amount={} future={:?} propagated={}",
            req.month, req.amount, req.apply_to_future_months, write.propagated
        )),
    )?;

    Ok(Json(write))
}

/// DELETE /api/budgets/:id - Delete one budget row
pub async fn delete_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let caller = caller_of(&request);

    state.tracker.delete_budget(caller.id(), id)?;
    audit(&state, &caller, "delete", "budget", Some(id), None)?;

    Ok(Json(SuccessResponse { success: true }))
}
