use crate::errors::AppError;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use mongodb::bson::oid::ObjectId;

/// Path extractor for a single MongoDB ObjectId segment.
///
/// Anything other than 24 hex characters is rejected with
/// `INVALID_OBJECT_ID` before the handler runs.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::ObjectIdPath;
///
/// async fn get_product(ObjectIdPath(id): ObjectIdPath) -> String {
///     id.to_hex()
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ObjectIdPath(pub ObjectId);

impl<S> FromRequestParts<S> for ObjectIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        ObjectId::parse_str(&raw)
            .map(ObjectIdPath)
            .map_err(|_| AppError::InvalidObjectId(raw))
    }
}
