use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};

use dotenvy::dotenv;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use errors::ServerError;
use issuer::{Issuer, SystemIssuer};
use models::customer::Customer;
use repositories::{InMemoryRepository, Repository};

pub mod config;
pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod issuer;
pub mod logger;
pub mod middlewares;
pub mod models;
pub mod repositories;
mod utils;

/// Shared handler state: the customer store and the id/clock issuer.
#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<dyn Repository<Customer>>,
    pub issuer: Arc<dyn Issuer>,
}

impl AppState {
    pub fn new(customers: Arc<dyn Repository<Customer>>, issuer: Arc<dyn Issuer>) -> Self {
        Self { customers, issuer }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryRepository::<Customer>::new()),
            Arc::new(SystemIssuer),
        )
    }
}

pub fn app(state: AppState) -> Router {
    let customer_middleware = axum::middleware::from_fn_with_state(
        state.clone(),
        middlewares::customer::check_customer,
    );

    Router::new()
        .route(
            "/customers/:customer_id/addresses/:address_id",
            get(handlers::address::get_by_id)
                .patch(handlers::address::update)
                .delete(handlers::address::delete),
        )
        .route(
            "/customers/:customer_id/addresses",
            get(handlers::address::get_all).post(handlers::address::create),
        )
        .route_layer(customer_middleware)
        .route(
            "/customers/:customer_id",
            get(handlers::customer::get_by_id)
                .patch(handlers::customer::update)
                .delete(handlers::customer::delete),
        )
        .route(
            "/customers",
            get(handlers::customer::get_all).post(handlers::customer::create),
        )
        .route("/health", get(handlers::health::get_health))
        .route("/", get(handlers::health::hello_world))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn axum() -> Result<(), ServerError> {
    dotenv().ok();

    logger::init();

    let config = crate::config::Config::from_env()?;
    let addr = config.server.address()?;

    let app = app(AppState::in_memory());

    tracing::info!("listening on {}", addr);
    axum::Server::try_bind(&addr)?
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
