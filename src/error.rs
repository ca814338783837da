use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// RepoError
///
/// Failure of a persistence call. Constraint violations surface as `Conflict` so the
/// handlers can report them as 409 instead of a generic 500.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("record not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepoError {
    /// Maps Postgres constraint violations onto `Conflict`, leaving every other failure as
    /// a `Database` error.
    ///
    /// 23505 unique_violation, 23503 foreign_key_violation, 23P01 exclusion_violation.
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if let Some(code) = db_err.code() {
                if matches!(&*code, "23505" | "23503" | "23P01") {
                    return RepoError::Conflict(db_err.message().to_string());
                }
            }
        }
        RepoError::Database(err)
    }
}

/// ValidationError
///
/// A payload that is well-formed JSON but violates a field rule.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// ParseEnumError
///
/// Raised when a TEXT column holds a value outside the enum it is decoded into.
#[derive(Debug, Error)]
#[error("invalid {kind}: {value:?}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// StorageError
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid presigning configuration: {0}")]
    Presigning(String),

    #[error("object storage request failed: {0}")]
    Request(String),
}

/// ConfigError
///
/// Startup configuration problems. Production refuses to boot with any of these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set in production")]
    MissingVar(&'static str),

    #[error("BIND_ADDR is not a valid socket address: {0}")]
    InvalidBindAddr(String),
}

/// AppError
///
/// The error type returned by every handler. Each variant maps to one HTTP status and a
/// JSON body of the form `{ "error": "..." }`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("authentication required")]
    Unauthorized,

    #[error("insufficient role for this action")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("storage unavailable")]
    Storage(#[from] StorageError),

    #[error("internal error")]
    Internal,
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound,
            RepoError::Conflict(message) => AppError::Conflict(message),
            RepoError::Database(e) => {
                tracing::error!(error = ?e, "repository call failed");
                AppError::Internal
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Storage(e) => {
                tracing::error!(error = %e, "storage call failed");
                StatusCode::BAD_GATEWAY
            }
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
