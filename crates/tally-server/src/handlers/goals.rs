//! Savings goal handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    Json,
};
use serde::Deserialize;

use crate::{audit, caller_of, read_json, AppError, AppState, SuccessResponse};
use tally_core::models::{NewSavingsGoal, SavingsGoal, SavingsGoalUpdate};

/// Request body for updating progress
#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub amount: f64,
}

/// GET /api/goals - List the caller's savings goals
pub async fn list_goals(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Vec<SavingsGoal>>, AppError> {
    let caller = caller_of(&request);
    Ok(Json(state.tracker.get_savings_goals(caller.id())?))
}

/// GET /api/goals/:id
pub async fn get_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SavingsGoal>, AppError> {
    let caller = caller_of(&request);
    Ok(Json(state.tracker.get_savings_goal(caller.id(), id)?))
}

/// POST /api/goals - Create a savings goal
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<SavingsGoal>, AppError> {
    let caller = caller_of(&request);
    let req: NewSavingsGoal = read_json(request).await?;

    let id = state.tracker.create_savings_goal(caller.id(), &req)?;
    audit(
        &state,
        &caller,
        "create",
        "savings_goal",
        Some(id),
        Some(&format!("name={} target={}", req.name, req.target_amount)),
    )?;

    Ok(Json(state.tracker.get_savings_goal(caller.id(), id)?))
}

/// PUT /api/goals/:id - Edit name, target, date and description
pub async fn update_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SavingsGoal>, AppError> {
    let caller = caller_of(&request);
    let req: SavingsGoalUpdate = read_json(request).await?;

    let goal = state.tracker.update_savings_goal(caller.id(), id, &req)?;
    audit(&state, &caller, "update", "savings_goal", Some(id), None)?;

    Ok(Json(goal))
}

/// POST /api/goals/:id/progress - Overwrite the saved amount
pub async fn update_goal_progress(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SavingsGoal>, AppError> {
    let caller = caller_of(&request);
    let req: ProgressRequest = read_json(request).await?;

    let goal = state
        .tracker
        .update_savings_goal_progress(caller.id(), id, req.amount)?;
    audit(
        &state,
        &caller,
        "progress",
        "savings_goal",
        Some(id),
        Some(&format!("amount={}", goal.current_amount)),
    )?;

    Ok(Json(goal))
}

/// DELETE /api/goals/:id
pub async fn delete_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let caller = caller_of(&request);

    state.tracker.delete_savings_goal(caller.id(), id)?;
    audit(&state, &caller, "delete", "savings_goal", Some(id), None)?;

    Ok(Json(SuccessResponse { success: true }))
}
