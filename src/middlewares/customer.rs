use axum::{
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::models::responses::DefaultResponse;
use crate::AppState;

/// Loads the customer named by `/customers/{customer_id}/...` into the
/// request extensions for the nested address handlers.
pub async fn check_customer<B>(
    State(state): State<AppState>,
    mut req: Request<B>,
    next: Next<B>,
) -> Response {
    let segment = {
        let paths = req.uri().path().split("/").collect::<Vec<&str>>();

        match paths.as_slice() {
            [_, "customers", customer_id, ..] => Some(customer_id.to_string()),
            _ => None,
        }
    };

    // If the path is not /customers/{customer_id} then skip this middleware
    let segment = match segment {
        Some(segment) => segment,
        None => return next.run(req).await,
    };

    let customer_id = match uuid::Uuid::parse_str(&segment) {
        Ok(customer_id) => customer_id,
        Err(err) => {
            let body = DefaultResponse::error("Invalid format customer id", err.to_string())
                .into_json();

            return (StatusCode::BAD_REQUEST, body).into_response();
        }
    };

    let customer = match state.customers.get(customer_id).await {
        Ok(customer) => customer,
        Err(err) => return err.into_response(),
    };

    req.extensions_mut().insert(customer);

    next.run(req).await
}
