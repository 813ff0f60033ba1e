use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::NaiveDate;
use chrono_tz::Asia;
use fitness_booking::db::Database;
use fitness_booking::models::NewClass;
use fitness_booking::service::BookingService;
use fitness_booking::settings::Settings;
use fitness_booking::{AppState, build_router};
use serde_json::Value;
use tower::Service;

fn test_settings() -> Settings {
    Settings {
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
        canonical_timezone: "Asia/Kolkata".to_string(),
        default_timezone: "Asia/Kolkata".to_string(),
        debug: true,
        enable_swagger: true,
        port: 8080,
    }
}

/// Helper to build an app over an in-memory database seeded with one class
/// per entry of `slots`, all scheduled for 2024-01-01 06:00 canonical time.
async fn create_test_app(slots: &[i64]) -> Router {
    let db = Database::in_memory().await.unwrap();
    for (i, &available_slots) in slots.iter().enumerate() {
        db.insert_class(&NewClass {
            name: if i == 0 { "Yoga".to_string() } else { format!("Class {i}") },
            date_time: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(6, 0, 0)
                .unwrap(),
            instructor: "Anna".to_string(),
            available_slots,
        })
        .await
        .unwrap();
    }
    let state = AppState::new(test_settings(), BookingService::new(db, Asia::Kolkata));
    build_router(state)
}

async fn get(app: &mut Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .call(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_json(response.into_body()).await)
}

async fn book(app: &mut Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .call(
            Request::builder()
                .method("POST")
                .uri("/book")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_json(response.into_body()).await)
}

/// Helper to extract a response body as JSON (`Null` when it is not JSON)
async fn body_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

#[tokio::test]
async fn test_root_endpoint() {
    let mut app = create_test_app(&[]).await;

    let (status, body) = get(&mut app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Fitness Booking API");
    assert!(body["endpoints"]["/classes"].is_string());
    assert!(body["endpoints"]["/book"].is_string());
    assert!(body["endpoints"]["/bookings"].is_string());
}

#[tokio::test]
async fn test_healthz_endpoints() {
    let mut app = create_test_app(&[]).await;

    let (status, body) = get(&mut app, "/healthz/live").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = get(&mut app, "/healthz/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_classes_default_timezone() {
    let mut app = create_test_app(&[1, 4]).await;

    let (status, body) = get(&mut app, "/classes").await;

    assert_eq!(status, StatusCode::OK);
    let classes = body.as_array().unwrap();
    assert_eq!(classes.len(), 2);
    assert_eq!(classes[0]["id"], 1);
    assert_eq!(classes[0]["name"], "Yoga");
    assert_eq!(classes[0]["date_time"], "2024-01-01T06:00:00+05:30");
    assert_eq!(classes[0]["instructor"], "Anna");
    assert_eq!(classes[0]["available_slots"], 1);
    assert_eq!(classes[1]["id"], 2);
    assert_eq!(classes[1]["available_slots"], 4);
}

#[tokio::test]
async fn test_list_classes_converted_timezone() {
    let mut app = create_test_app(&[1]).await;

    let (status, body) = get(&mut app, "/classes?timezone=Asia/Tokyo").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["date_time"], "2024-01-01T09:30:00+09:00");
}

#[tokio::test]
async fn test_list_classes_invalid_timezone() {
    let mut app = create_test_app(&[1]).await;

    let (status, body) = get(&mut app, "/classes?timezone=Not/AZone").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid timezone: Not/AZone");
}

#[tokio::test]
async fn test_book_last_slot_then_full() {
    let mut app = create_test_app(&[1]).await;

    let (status, body) = book(
        &mut app,
        serde_json::json!({"class_id": 1, "client_name": "Alice", "client_email": "a@x.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({"id": 1, "class_id": 1, "client_name": "Alice", "client_email": "a@x.com"})
    );

    let (_, classes) = get(&mut app, "/classes").await;
    assert_eq!(classes[0]["available_slots"], 0);

    let (status, body) = book(
        &mut app,
        serde_json::json!({"class_id": 1, "client_name": "Bob", "client_email": "b@x.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "No available slots");

    let (_, classes) = get(&mut app, "/classes").await;
    assert_eq!(classes[0]["available_slots"], 0);
}

#[tokio::test]
async fn test_book_unknown_class() {
    let mut app = create_test_app(&[3]).await;

    let (status, body) = book(
        &mut app,
        serde_json::json!({"class_id": 99, "client_name": "Alice", "client_email": "a@x.com"}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Class not found");
    let (_, classes) = get(&mut app, "/classes").await;
    assert_eq!(classes[0]["available_slots"], 3);
}

#[tokio::test]
async fn test_book_invalid_email() {
    let mut app = create_test_app(&[3]).await;

    let (status, _) = book(
        &mut app,
        serde_json::json!({"class_id": 1, "client_name": "Alice", "client_email": "nope"}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let (_, classes) = get(&mut app, "/classes").await;
    assert_eq!(classes[0]["available_slots"], 3);
}

#[tokio::test]
async fn test_book_missing_field() {
    let mut app = create_test_app(&[3]).await;

    let (status, _) = book(
        &mut app,
        serde_json::json!({"class_id": 1, "client_email": "a@x.com"}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_get_bookings_by_email() {
    let mut app = create_test_app(&[5, 5]).await;
    for (class_id, name, email) in [
        (1, "Alice", "a@x.com"),
        (2, "Bob", "b@x.com"),
        (2, "Alice", "a@x.com"),
    ] {
        let (status, _) = book(
            &mut app,
            serde_json::json!({"class_id": class_id, "client_name": name, "client_email": email}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = get(&mut app, "/bookings?email=a@x.com").await;
    assert_eq!(status, StatusCode::OK);
    let bookings = body.as_array().unwrap();
    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[0]["class_id"], 1);
    assert_eq!(bookings[1]["class_id"], 2);
    assert!(bookings.iter().all(|b| b["client_email"] == "a@x.com"));

    let (status, body) = get(&mut app, "/bookings?email=nobody@x.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_get_bookings_invalid_email() {
    let mut app = create_test_app(&[]).await;

    let (status, body) = get(&mut app, "/bookings?email=not-an-email").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid email address: not-an-email");
}

#[tokio::test]
async fn test_get_bookings_missing_email() {
    let mut app = create_test_app(&[]).await;

    let (status, _) = get(&mut app, "/bookings").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_openapi_document() {
    let mut app = create_test_app(&[]).await;

    let (status, body) = get(&mut app, "/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/classes"].is_object());
    assert!(body["paths"]["/book"].is_object());
    assert!(body["paths"]["/bookings"].is_object());
}
