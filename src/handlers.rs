use axum::extract::{Query, State};
use axum::{Json, response::IntoResponse};
use tracing::error;

use crate::{
    AppState,
    error::ApiError,
    models::{Booking, BookingRequest, ClassOut},
};

#[derive(Debug, serde::Deserialize)]
pub struct ClassesQuery {
    pub timezone: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct BookingsQuery {
    pub email: String,
}

#[utoipa::path(get, path = "/", tag = "booking")]
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Fitness Booking API",
        "endpoints": {
            "/classes": "List classes, optionally converted to ?timezone=",
            "/book": "Book a slot in a class",
            "/bookings": "List bookings for ?email="
        }
    }))
}

#[utoipa::path(get, path = "/healthz/live", tag = "booking")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(
    get,
    path = "/healthz/ready",
    responses(
        (status = 200, description = "Database reachable"),
        (status = 503, description = "Database unreachable")
    ),
    tag = "booking"
)]
pub async fn healthz_ready(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    state.service.database().ping().await.map_err(|err| {
        error!("Readiness check failed: {err}");
        ApiError::Unavailable("Database unavailable".into())
    })?;
    Ok(Json(serde_json::json!({"status": "ok"})))
}

#[utoipa::path(
    get,
    path = "/classes",
    params(
        ("timezone" = Option<String>, Query, description = "IANA timezone to express class times in")
    ),
    responses(
        (status = 200, description = "All classes", body = [ClassOut]),
        (status = 400, description = "Invalid timezone")
    ),
    tag = "booking"
)]
pub async fn list_classes(
    State(state): State<AppState>,
    Query(query): Query<ClassesQuery>,
) -> Result<Json<Vec<ClassOut>>, ApiError> {
    let timezone = query
        .timezone
        .as_deref()
        .unwrap_or(&state.settings.default_timezone);
    let classes = state.service.list_classes(timezone).await?;
    Ok(Json(classes))
}

#[utoipa::path(
    post,
    path = "/book",
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Booking created", body = Booking),
        (status = 400, description = "No available slots"),
        (status = 404, description = "Class not found"),
        (status = 422, description = "Invalid request body")
    ),
    tag = "booking"
)]
pub async fn book_class(
    State(state): State<AppState>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<Booking>, ApiError> {
    let booking = state
        .service
        .book_class(&request)
        .await
        .map_err(ApiError::from_body_validation)?;
    Ok(Json(booking))
}

#[utoipa::path(
    get,
    path = "/bookings",
    params(
        ("email" = String, Query, description = "Client email address")
    ),
    responses(
        (status = 200, description = "Bookings made with this email", body = [Booking]),
        (status = 400, description = "Invalid email address")
    ),
    tag = "booking"
)]
pub async fn get_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    let bookings = state.service.bookings_for(&query.email).await?;
    Ok(Json(bookings))
}
