//! User preference handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};

use crate::{audit, caller_of, read_json, AppError, AppState};
use tally_core::models::{PreferencesUpdate, UserPreferences};

/// GET /api/preferences - The caller's preferences (created with defaults on first read)
pub async fn get_preferences(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<UserPreferences>, AppError> {
    let caller = caller_of(&request);
    Ok(Json(state.tracker.get_user_preferences(caller.id())?))
}

/// PATCH /api/preferences - Update any subset of preferences
pub async fn update_preferences(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<UserPreferences>, AppError> {
    let caller = caller_of(&request);
    let req: PreferencesUpdate = read_json(request).await?;

    let prefs = state.tracker.update_user_preferences(caller.id(), &req)?;
    audit(&state, &caller, "update", "preferences", Some(prefs.id), None)?;

    Ok(Json(prefs))
}
