#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use customer_api::{
    issuer::SteppingIssuer, models::customer::Customer, repositories::InMemoryRepository,
    AppState,
};

/// Router over a fresh in-memory store and a deterministic clock.
pub fn test_app() -> Router {
    let issuer = SteppingIssuer::starting_at(Utc.with_ymd_and_hms(2025, 9, 30, 10, 20, 30).unwrap());
    let state = AppState::new(
        Arc::new(InMemoryRepository::<Customer>::new()),
        Arc::new(issuer),
    );

    customer_api::app(state)
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

pub fn rahul() -> Value {
    json!({
        "first_name": "Rahul",
        "middle_name": "Kumar",
        "last_name": "Singh",
        "university_id": "UNI1234",
        "email": "rahul@columbia.edu",
        "phone": "+1-646-895-5796",
        "birth_date": "2000-07-15",
        "status": "active",
        "address": [broadway()],
    })
}

pub fn broadway() -> Value {
    json!({
        "street": "123 Broadway Ave",
        "city": "New York",
        "state": "NY",
        "postal_code": "10027",
        "country": "USA",
    })
}

pub async fn create_rahul(app: &Router) -> Value {
    let (status, body) = send(app, "POST", "/customers", Some(rahul())).await;
    assert_eq!(status, StatusCode::CREATED);
    body
}
