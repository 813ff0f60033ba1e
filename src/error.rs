use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::service::BookingError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Unprocessable(String),
    Unavailable(String),
    Internal(String),
}

impl ApiError {
    /// Request-body validation failures are reported as 422, like other
    /// malformed-body rejections.
    pub fn from_body_validation(value: BookingError) -> Self {
        match value {
            BookingError::InvalidEmail(_) | BookingError::InvalidName => {
                ApiError::Unprocessable(value.to_string())
            }
            other => other.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

impl From<BookingError> for ApiError {
    fn from(value: BookingError) -> Self {
        match value {
            BookingError::InvalidTimezone(_)
            | BookingError::NoSlotsAvailable(_)
            | BookingError::InvalidEmail(_)
            | BookingError::InvalidName => ApiError::BadRequest(value.to_string()),
            BookingError::ClassNotFound(_) => ApiError::NotFound(value.to_string()),
            BookingError::Database(err) => {
                error!("Database error: {err}");
                ApiError::Internal("Internal server error".into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_status() {
        let cases = [
            (
                BookingError::InvalidTimezone("Not/AZone".into()),
                StatusCode::BAD_REQUEST,
            ),
            (BookingError::NoSlotsAvailable(1), StatusCode::BAD_REQUEST),
            (BookingError::ClassNotFound(1), StatusCode::NOT_FOUND),
            (
                BookingError::Database(sqlx::Error::PoolClosed),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_body_validation_is_unprocessable() {
        let response = ApiError::from_body_validation(BookingError::InvalidEmail("x".into()))
            .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response =
            ApiError::from_body_validation(BookingError::ClassNotFound(3)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
