//! A customer deleted while a write to it is in flight stays deleted.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use serde_json::json;
use uuid::Uuid;

use common::{rahul, send};
use customer_api::{
    errors::ApiError,
    issuer::SteppingIssuer,
    models::customer::Customer,
    repositories::{Change, InMemoryRepository, Repository},
    AppState,
};

/// Store where every lookup is immediately followed by a delete of the same
/// customer, as if a DELETE request landed right after it.
struct DeletedAfterLookup {
    inner: Arc<InMemoryRepository<Customer>>,
}

#[async_trait]
impl Repository<Customer> for DeletedAfterLookup {
    async fn get(&self, id: Uuid) -> Result<Customer, ApiError> {
        let customer = self.inner.get(id).await?;
        self.inner.delete(id).await?;
        Ok(customer)
    }

    async fn put(&self, entity: Customer) -> Result<Customer, ApiError> {
        self.inner.put(entity).await
    }

    async fn update<'a>(&self, id: Uuid, change: Change<'a, Customer>) -> Result<Customer, ApiError> {
        self.inner.update(id, change).await
    }

    async fn delete(&self, id: Uuid) -> Result<Customer, ApiError> {
        self.inner.delete(id).await
    }

    async fn list(&self) -> Result<Vec<Customer>, ApiError> {
        self.inner.list().await
    }
}

fn racing_app() -> (axum::Router, Arc<InMemoryRepository<Customer>>) {
    let inner = Arc::new(InMemoryRepository::<Customer>::new());
    let issuer = SteppingIssuer::starting_at(Utc.with_ymd_and_hms(2025, 9, 30, 10, 20, 30).unwrap());
    let state = AppState::new(
        Arc::new(DeletedAfterLookup {
            inner: inner.clone(),
        }),
        Arc::new(issuer),
    );

    (customer_api::app(state), inner)
}

async fn created_customer(app: &axum::Router) -> (String, String) {
    let (status, body) = send(app, "POST", "/customers", Some(rahul())).await;
    assert_eq!(status, StatusCode::CREATED);

    (
        body["customer_id"].as_str().unwrap().to_string(),
        body["address"][0]["address_id"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn address_writes_do_not_restore_a_deleted_customer() {
    let (app, store) = racing_app();
    let elm = json!({
        "street": "456 Elm Street",
        "city": "Boston",
        "state": "MA",
        "postal_code": "02118",
        "country": "USA",
    });

    let (customer_id, _) = created_customer(&app).await;
    let uri = format!("/customers/{customer_id}/addresses");
    let (post_status, post_body) = send(&app, "POST", &uri, Some(elm)).await;
    assert_eq!(post_status, StatusCode::NOT_FOUND);
    assert_eq!(post_body["message"], "customer not found");
    assert!(store.list().await.unwrap().is_empty());

    let (customer_id, address_id) = created_customer(&app).await;
    let uri = format!("/customers/{customer_id}/addresses/{address_id}");
    let (patch_status, _) = send(&app, "PATCH", &uri, Some(json!({ "city": "Boston" }))).await;
    assert_eq!(patch_status, StatusCode::NOT_FOUND);
    assert!(store.list().await.unwrap().is_empty());

    let (customer_id, address_id) = created_customer(&app).await;
    let uri = format!("/customers/{customer_id}/addresses/{address_id}");
    let (delete_status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(delete_status, StatusCode::NOT_FOUND);
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn customer_patch_does_not_restore_a_deleted_customer() {
    let (app, store) = racing_app();
    let (customer_id, _) = created_customer(&app).await;
    let uri = format!("/customers/{customer_id}");

    let (get_status, _) = send(&app, "GET", &uri, None).await;
    let (patch_status, _) = send(&app, "PATCH", &uri, Some(json!({ "status": "inactive" }))).await;

    assert_eq!(get_status, StatusCode::OK);
    assert_eq!(patch_status, StatusCode::NOT_FOUND);
    assert!(store.list().await.unwrap().is_empty());
}
