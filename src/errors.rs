use std::collections::BTreeMap;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::models::responses::DefaultResponse;

/// Field name to the constraint messages it violated.
#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Errors {
    errors: BTreeMap<String, Vec<String>>,
}

impl Errors {
    pub fn new(errs: &[(&str, &str)]) -> Self {
        let mut errors = Errors::default();
        for (field, message) in errs {
            errors.push(*field, *message);
        }
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Re-keys `other` under `prefix`, e.g. `city` becomes `address[0].city`.
    pub fn nest(&mut self, prefix: &str, other: Errors) {
        for (field, messages) in other.errors {
            self.errors
                .entry(format!("{}.{}", prefix, field))
                .or_default()
                .extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }
}

impl From<ValidationErrors> for Errors {
    fn from(err: ValidationErrors) -> Self {
        let mut errors = Errors::default();

        for (field, field_errors) in err.field_errors() {
            for error in field_errors {
                let message = match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid ({})", field, error.code),
                };
                errors.push(field, message);
            }
        }

        errors
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for Errors {}

/// Collects every problem in a payload before rejecting it.
pub struct FieldValidator {
    errors: Errors,
}

impl FieldValidator {
    pub fn validate<T: Validate>(model: &T) -> Self {
        Self {
            errors: model.validate().err().map(Errors::from).unwrap_or_default(),
        }
    }

    /// Unwraps a required field, recording it as missing when absent.
    pub fn extract<T: Default>(&mut self, field_name: &str, field: Option<T>) -> T {
        field.unwrap_or_else(|| {
            self.errors
                .push(field_name, format!("{} is required", field_name));
            T::default()
        })
    }

    /// Required fields may be omitted from a patch but never sent as `null`.
    pub fn reject_null<T>(&mut self, field_name: &str, field: &Option<Option<T>>) {
        if let Some(None) = field {
            self.errors
                .push(field_name, format!("{} cannot be null", field_name));
        }
    }

    /// Folds a nested payload's outcome in under `prefix`.
    pub fn absorb<T>(&mut self, prefix: &str, result: Result<T, Errors>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(errors) => {
                self.errors.nest(prefix, errors);
                None
            }
        }
    }

    pub fn check(self) -> Result<(), Errors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(Errors),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },
    #[error("repository failure: {0}")]
    Repository(String),
}

impl ApiError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        ApiError::NotFound { entity, id }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Errors> for ApiError {
    fn from(errors: Errors) -> Self {
        ApiError::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            ApiError::Validation(errors) => {
                DefaultResponse::error("validation failed", errors.to_string())
                    .with_errors(json!(errors))
            }
            ApiError::NotFound { entity, .. } => {
                DefaultResponse::error(&format!("{} not found", entity), self.to_string())
            }
            ApiError::Repository(_) => {
                tracing::error!("{}", self);
                DefaultResponse::error("internal server error", self.to_string())
            }
        };

        (status, body.into_json()).into_response()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("invalid listen address: {0}")]
    Address(#[from] std::net::AddrParseError),
    #[error("server failure: {0}")]
    Serve(#[from] hyper::Error),
}
