use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::models::ApiResult;

pub mod contact;
pub mod health;
pub mod resume;

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

fn ok(message: &'static str) -> Response {
    Json(ApiResult::<()>::ok(message)).into_response()
}

fn error(code: StatusCode, message: &'static str) -> Response {
    (code, Json(ApiResult::<()>::error(message))).into_response()
}

fn error_with_details<E: Serialize>(
    code: StatusCode,
    message: &'static str,
    errors: Vec<E>,
) -> Response {
    let result = ApiResult {
        errors: Some(errors),
        ..ApiResult::error(message)
    };
    (code, Json(result)).into_response()
}
