use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use mongodb::bson::oid::ObjectId;
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

/// Server error code for a unique index violation.
pub const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product with id {0} not found")]
    NotFound(ObjectId),

    /// Carries the offending `{ field: value }` fragment reported by the server.
    #[error("Duplicate data already registered: {0}")]
    DuplicateKey(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Every product failure is reported as a 400; the code tells them apart.
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        let code = match &err {
            ProductError::NotFound(_) => ErrorCode::NotFound,
            ProductError::DuplicateKey(_) => ErrorCode::DuplicateKey,
            ProductError::Validation(_) => ErrorCode::ValidationError,
            ProductError::Database(_) => ErrorCode::DatabaseError,
            ProductError::Internal(_) => ErrorCode::InternalError,
        };
        AppError::client(code, err.to_string())
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        match duplicate_key_message(&err) {
            Some(message) => ProductError::DuplicateKey(dup_key_fragment(message)),
            None => ProductError::Database(err.to_string()),
        }
    }
}

impl From<mongodb::bson::ser::Error> for ProductError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        ProductError::Internal(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ProductError {
    fn from(err: validator::ValidationErrors) -> Self {
        ProductError::Validation(err.to_string())
    }
}

/// Server message of an E11000 failure, from either a write or a
/// find-and-modify command.
fn duplicate_key_message(err: &mongodb::error::Error) -> Option<&str> {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY_CODE => {
            Some(e.message.as_str())
        }
        ErrorKind::Command(e) if e.code == DUPLICATE_KEY_CODE => Some(e.message.as_str()),
        _ => None,
    }
}

/// `E11000 ... dup key: { name: "Lamp" }` -> `{ name: "Lamp" }`.
///
/// Falls back to the whole message when the server omits the fragment.
pub fn dup_key_fragment(message: &str) -> String {
    message
        .split_once("dup key: ")
        .map(|(_, fragment)| fragment.trim())
        .filter(|fragment| !fragment.is_empty())
        .unwrap_or(message)
        .to_string()
}
