use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

/// Integer `{id}` path segment
///
/// Anything that does not parse as an `i32` is rejected with a 400 before a
/// handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoId(pub i32);

impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

        raw.trim()
            .parse::<i32>()
            .map(TodoId)
            .map_err(|_| AppError::bad_request(format!("Invalid todo id: {raw}")))
    }
}
