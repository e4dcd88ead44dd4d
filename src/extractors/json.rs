//! JSON body extractor that reports rejections through [`AppError`].

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;

/// Like [`axum::Json`], but a missing or wrong `Content-Type` is a 415, a body that does not
/// fit the expected shape is a 400 validation error, malformed JSON is a 400 bad request and a
/// body over the configured limit is a 413.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    let text = rejection.body_text();
    let status = rejection.status();
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            AppError::UnsupportedMediaType("Content-Type must be application/json".into())
        }
        JsonRejection::JsonDataError(_) => AppError::validation(text),
        JsonRejection::JsonSyntaxError(_) => AppError::BadRequest(text),
        _ if status == StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(text),
        _ => AppError::BadRequest(text),
    }
}
