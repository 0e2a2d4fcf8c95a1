use axum::extract::State;
use axum::response::Json;
use serde_json::Value;

use crate::models::health::Health;
use crate::models::responses::DefaultResponse;
use crate::AppState;

pub async fn get_health(State(state): State<AppState>) -> Json<Health> {
    Json(Health::ok(state.issuer.now()))
}

pub async fn hello_world() -> Json<Value> {
    DefaultResponse::ok("Welcome to the Customer API. Customers live under /customers.").into_json()
}
