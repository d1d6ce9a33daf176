use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::credentials::CredentialError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0} already exists")]
    Duplicate(&'static str),

    #[error("No fields to update")]
    NoFieldsToUpdate,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl AppError {
    /// Translate constraint violations raised by the store into the same
    /// categories the pre-checks produce. `entity` names the table being written.
    pub fn from_write(entity: &'static str, err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return AppError::Duplicate(entity);
            }
            if db_err.is_foreign_key_violation() {
                return AppError::Conflict(format!("{} is referenced by other records", entity));
            }
        }
        AppError::Database(err)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Duplicate(_) | AppError::NoFieldsToUpdate => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Credential(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            AppError::Database(e) => {
                error!("database error: {}", e);
                "Internal server error".to_string()
            }
            AppError::Credential(e) => {
                error!("credential error: {}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            detail,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::NotFound("Student").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Duplicate("Admin").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NoFieldsToUpdate.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Conflict("x".to_string()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_detail_messages() {
        assert_eq!(AppError::NotFound("Professor").to_string(), "Professor not found");
        assert_eq!(AppError::Duplicate("Admin").to_string(), "Admin already exists");
        assert_eq!(AppError::InvalidCredentials.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_non_database_error_is_not_remapped() {
        let err = AppError::from_write("Student", sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::Database(_)));
    }
}
