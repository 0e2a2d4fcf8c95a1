//! Addresses nested under `/customers/:customer_id`. Reads use the customer
//! loaded by [`crate::middlewares::customer::check_customer`]; writes go
//! through [`crate::repositories::Repository::update`] so they never act on a
//! stale or deleted customer.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::Extension;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::extractors::JsonBody;
use crate::models::address::Address;
use crate::models::customer::Customer;
use crate::models::requests::address::{RequestCreateAddress, RequestUpdateAddress};
use crate::AppState;

pub async fn get_all(Extension(customer): Extension<Customer>) -> Json<Vec<Address>> {
    Json(customer.address)
}

pub async fn create(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
    JsonBody(body): JsonBody<RequestCreateAddress>,
) -> Result<Response, ApiError> {
    let new_address = body.into_new_address()?;

    let address = Address::create(new_address, state.issuer.as_ref());
    let added = address.clone();
    state
        .customers
        .update(
            customer_id,
            Box::new(move |mut customer: Customer| {
                customer.add_address(added);
                Ok(customer)
            }),
        )
        .await?;
    tracing::info!(%customer_id, address_id = %address.address_id, "address created");

    Ok((StatusCode::CREATED, Json(address)).into_response())
}

pub async fn get_by_id(
    Extension(customer): Extension<Customer>,
    Path((_, address_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Address>, ApiError> {
    let address = customer.find_address(address_id)?;

    Ok(Json(address.clone()))
}

pub async fn update(
    State(state): State<AppState>,
    Path((customer_id, address_id)): Path<(Uuid, Uuid)>,
    JsonBody(body): JsonBody<RequestUpdateAddress>,
) -> Result<Json<Address>, ApiError> {
    let patch = body.validate_update()?;

    let issuer = state.issuer.clone();
    let customer = state
        .customers
        .update(
            customer_id,
            Box::new(move |mut customer: Customer| -> Result<Customer, ApiError> {
                customer.update_address(address_id, patch, issuer.as_ref())?;
                Ok(customer)
            }),
        )
        .await?;
    tracing::info!(%customer_id, %address_id, "address updated");

    Ok(Json(customer.find_address(address_id)?.clone()))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((customer_id, address_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let issuer = state.issuer.clone();
    state
        .customers
        .update(
            customer_id,
            Box::new(move |mut customer: Customer| -> Result<Customer, ApiError> {
                customer.remove_address(address_id, issuer.as_ref())?;
                Ok(customer)
            }),
        )
        .await?;
    tracing::info!(%customer_id, %address_id, "address deleted");

    Ok(StatusCode::NO_CONTENT)
}
