use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("This member is already registered")]
    DuplicateMember,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

// Bodies that are not valid JSON, or do not fit the request type, are input errors.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(ref msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::DuplicateMember => (StatusCode::CONFLICT, self.to_string()),
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Storage(ref msg) => {
                tracing::error!("Storage error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Database(ref err) => {
                tracing::error!("Database error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error occurred".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Failures while bringing the store up. These never reach a request
/// handler; `main` reports them and exits.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Required variables are missing from the environment: {}", .0.join(", "))]
    MissingConfig(Vec<&'static str>),

    #[error("Invalid database configuration: {0}")]
    InvalidConfig(String),

    #[error("Unable to connect to the database after {attempts} attempts: {source}")]
    Unreachable {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to create schema: {0}")]
    Schema(#[source] sqlx::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_error_taxonomy() {
        let cases = [
            (AppError::Validation("bad".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::DuplicateMember, StatusCode::CONFLICT),
            (AppError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (AppError::Storage("oops".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Database(sqlx::Error::RowNotFound), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn missing_config_lists_every_variable() {
        let err = DbError::MissingConfig(vec!["DB_HOST", "DB_PASSWORD"]);
        assert_eq!(
            err.to_string(),
            "Required variables are missing from the environment: DB_HOST, DB_PASSWORD"
        );
    }
}
