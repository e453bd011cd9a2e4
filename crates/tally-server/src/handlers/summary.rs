//! Summary and spending report handlers

use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{caller_of, AppError, AppState};
use tally_core::models::{CategoryTotal, Summary, TransactionType};
use tally_core::Month;

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub month: Month,
}

#[derive(Debug, Deserialize)]
pub struct YearQuery {
    pub year: i32,
}

/// Query parameters for spending by category
#[derive(Debug, Deserialize)]
pub struct SpendingQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
}

/// GET /api/summary/monthly?month=YYYY-MM
pub async fn monthly_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthQuery>,
    request: Request,
) -> Result<Json<Summary>, AppError> {
    let caller = caller_of(&request);
    Ok(Json(
        state.tracker.get_monthly_summary(caller.id(), params.month)?,
    ))
}

/// GET /api/summary/yearly?year=YYYY
pub async fn yearly_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<YearQuery>,
    request: Request,
) -> Result<Json<Summary>, AppError> {
    let caller = caller_of(&request);
    Ok(Json(state.tracker.get_yearly_summary(caller.id(), params.year)?))
}

/// GET /api/summary/all-time
pub async fn all_time_summary(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Summary>, AppError> {
    let caller = caller_of(&request);
    Ok(Json(state.tracker.get_all_time_summary(caller.id())?))
}

/// GET /api/spending - Totals per category, largest first
pub async fn spending_by_category(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SpendingQuery>,
    request: Request,
) -> Result<Json<Vec<CategoryTotal>>, AppError> {
    let caller = caller_of(&request);
    let totals = state.tracker.get_spending_by_category(
        caller.id(),
        params.start_date,
        params.end_date,
        params.transaction_type,
    )?;
    Ok(Json(totals))
}
