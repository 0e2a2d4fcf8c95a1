use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest},
    http::Request,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{ApiError, Errors};

/// JSON request body. Unlike [`axum::Json`], a body that does not fit `T`
/// is rejected through [`ApiError::Validation`], keyed by the offending
/// field path (`email`, `address[0].city`) or `body` when there is none.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, B, T> FromRequest<S, B> for JsonBody<T>
where
    Json<Value>: FromRequest<S, B, Rejection = JsonRejection>,
    S: Send + Sync,
    B: Send + 'static,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| rejected("body", rejection.body_text()))?;

        match serde_path_to_error::deserialize(value) {
            Ok(body) => Ok(JsonBody(body)),
            Err(err) => {
                let path = err.path().to_string();
                let field = if path == "." { "body" } else { path.as_str() };

                Err(rejected(field, err.inner().to_string()))
            }
        }
    }
}

fn rejected(field: &str, message: String) -> ApiError {
    let mut errors = Errors::default();
    errors.push(field, message);

    tracing::debug!("request body rejected: {}", errors);
    errors.into()
}
