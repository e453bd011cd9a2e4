//! Authentication-related handlers

use axum::extract::Request;
use axum::Json;
use serde::Serialize;

use crate::{caller_of, AppError, AuthMethod};

/// Response for the /api/me endpoint
#[derive(Serialize)]
pub struct MeResponse {
    /// The authenticated user's email or identifier
    pub user: String,
    /// How the user was authenticated
    pub auth_method: AuthMethod,
}

/// GET /api/me - Get the currently authenticated user
pub async fn get_me(request: Request) -> Result<Json<MeResponse>, AppError> {
    let caller = caller_of(&request);
    let user = caller
        .user
        .ok_or_else(|| AppError::unauthorized("Not authenticated"))?;

    Ok(Json(MeResponse {
        user,
        auth_method: caller.method,
    }))
}
