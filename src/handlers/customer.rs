use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::extractors::JsonBody;
use crate::models::customer::Customer;
use crate::models::requests::customer::{RequestCreateCustomer, RequestUpdateCustomer};
use crate::AppState;

pub async fn get_all(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, ApiError> {
    let customers = state.customers.list().await?;

    Ok(Json(customers))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RequestCreateCustomer>,
) -> Result<Response, ApiError> {
    let customer = match body.validate_create(state.issuer.as_ref()) {
        Ok(customer) => customer,
        Err(errors) => {
            tracing::debug!("create customer rejected: {}", errors);
            return Err(errors.into());
        }
    };

    let customer = state.customers.put(customer).await?;
    tracing::info!(customer_id = %customer.customer_id, "customer created");

    Ok((StatusCode::CREATED, Json(customer)).into_response())
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<Customer>, ApiError> {
    let customer = state.customers.get(customer_id).await?;

    Ok(Json(customer))
}

pub async fn update(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
    JsonBody(body): JsonBody<RequestUpdateCustomer>,
) -> Result<Json<Customer>, ApiError> {
    let patch = match body.validate_update() {
        Ok(patch) => patch,
        Err(errors) => {
            tracing::debug!(%customer_id, "update customer rejected: {}", errors);
            return Err(errors.into());
        }
    };

    let issuer = state.issuer.clone();
    let customer = state
        .customers
        .update(
            customer_id,
            Box::new(move |existing: Customer| Ok(existing.merge(patch, issuer.as_ref()))),
        )
        .await?;
    tracing::info!(%customer_id, "customer updated");

    Ok(Json(customer))
}

/// Addresses are embedded, so they go with the customer.
pub async fn delete(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let customer = state.customers.delete(customer_id).await?;
    tracing::info!(
        %customer_id,
        addresses = customer.address.len(),
        "customer deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
