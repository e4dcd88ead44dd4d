//! Response helpers. Customers are returned bare (no envelope); errors use [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

/// 201 with the new resource's `Location`.
pub fn created<T: Serialize>(location: &str, data: T) -> Response {
    let mut response = (StatusCode::CREATED, Json(data)).into_response();
    if let Ok(value) = HeaderValue::from_str(location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}

pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}
