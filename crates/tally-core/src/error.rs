//! Error types for Tally

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// No caller identity was supplied
    #[error("Not authenticated")]
    Unauthenticated,

    /// Row is missing or belongs to another user (deliberately indistinguishable)
    #[error("{entity} not found or unauthorized")]
    NotFoundOrUnauthorized { entity: &'static str },

    /// Referenced category is missing or owned by someone else
    #[error("Invalid category")]
    InvalidCategory,

    /// Default categories cannot be deleted
    #[error("Cannot delete default category")]
    ProtectedDefault,
}

impl Error {
    pub(crate) fn not_found(entity: &'static str) -> Self {
        Self::NotFoundOrUnauthorized { entity }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
