use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub type ApiResult<T> = Result<Envelope<T>, AppError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failed,
}

/// Uniform body of every todo operation
///
/// `statusCode` mirrors the HTTP status of the outcome so that the HTTP layer
/// can pass the envelope through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T: Serialize> {
    pub status: Status,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self::success(StatusCode::OK, Some(data), None)
    }

    pub fn created(data: T) -> Self {
        Self::success(StatusCode::CREATED, Some(data), None)
    }

    pub fn no_content(message: impl Into<String>) -> Self {
        Self::success(StatusCode::NO_CONTENT, None, Some(message.into()))
    }

    /// Success without a payload, only a message
    pub fn done(message: impl Into<String>) -> Self {
        Self::success(StatusCode::OK, None, Some(message.into()))
    }

    pub fn failed(err: &AppError) -> Self {
        Self::failed_with(err.status(), err.message())
    }

    pub fn failed_with(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: Status::Failed,
            status_code: status.as_u16(),
            data: None,
            message: Some(message.into()),
        }
    }

    fn success(status: StatusCode, data: Option<T>, message: Option<String>) -> Self {
        Self {
            status: Status::Success,
            status_code: status.as_u16(),
            data,
            message,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        // A 204 response has no body, which would drop the message.
        let status = match StatusCode::from_u16(self.status_code) {
            Ok(StatusCode::NO_CONTENT) => StatusCode::OK,
            Ok(status) => status,
            Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        Envelope::<()>::failed(&self).into_response()
    }
}
