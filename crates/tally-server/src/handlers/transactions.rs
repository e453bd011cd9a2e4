//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{audit, caller_of, read_json, AppError, AppState, SuccessResponse, MAX_PAGE_LIMIT};
use tally_core::models::{
    NewTransaction, TransactionFilter, TransactionType, TransactionUpdate, TransactionWithCategory,
};

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub category_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<i64>,
}

/// Query parameters for recent transactions
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<i64>,
}

fn clamp_limit(limit: i64) -> usize {
    limit.clamp(1, MAX_PAGE_LIMIT) as usize
}

/// GET /api/transactions - List transactions, newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TransactionQuery>,
    request: Request,
) -> Result<Json<Vec<TransactionWithCategory>>, AppError> {
    let caller = caller_of(&request);

    let filter = TransactionFilter {
        transaction_type: params.transaction_type,
        category_id: params.category_id,
        start_date: params.start_date,
        end_date: params.end_date,
        limit: params.limit.map(clamp_limit),
    };

    Ok(Json(state.tracker.get_transactions(caller.id(), &filter)?))
}

/// GET /api/transactions/recent - Most recent transactions (default 10)
pub async fn recent_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecentQuery>,
    request: Request,
) -> Result<Json<Vec<TransactionWithCategory>>, AppError> {
    let caller = caller_of(&request);
    let transactions = state
        .tracker
        .get_recent_transactions(caller.id(), params.limit.map(clamp_limit))?;
    Ok(Json(transactions))
}

/// GET /api/transactions/:id - Get one transaction with its category
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<TransactionWithCategory>, AppError> {
    let caller = caller_of(&request);
    Ok(Json(state.tracker.get_transaction(caller.id(), id)?))
}

/// POST /api/transactions - Record a transaction
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<TransactionWithCategory>, AppError> {
    let caller = caller_of(&request);
    let req: NewTransaction = read_json(request).await?;

    let id = state.tracker.create_transaction(caller.id(), &req)?;
    audit(
        &state,
        &caller,
        "create",
        "transaction",
        Some(id),
        Some(&format!(
            "type={} amount={} date={}",
            req.transaction_type, req.amount, req.date
        )),
    )?;

    Ok(Json(state.tracker.get_transaction(caller.id(), id)?))
}

/// PUT /api/transactions/:id - Update amount, category, date and description
pub async fn update_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<TransactionWithCategory>, AppError> {
    let caller = caller_of(&request);
    let req: TransactionUpdate = read_json(request).await?;

    state.tracker.update_transaction(caller.id(), id, &req)?;
    audit(
        &state,
        &caller,
        "update",
        "transaction",
        Some(id),
        Some(&format!("amount={} date={}", req.amount, req.date)),
    )?;

    Ok(Json(state.tracker.get_transaction(caller.id(), id)?))
}

/// DELETE /api/transactions/:id - Delete a transaction
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let caller = caller_of(&request);

    state.tracker.delete_transaction(caller.id(), id)?;
    audit(&state, &caller, "delete", "transaction", Some(id), None)?;

    Ok(Json(SuccessResponse { success: true }))
}
