use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use validator_derive::Validate;

use crate::errors::{Errors, FieldValidator};
use crate::issuer::Issuer;
use crate::models::address::NewAddress;
use crate::models::customer::{Customer, CustomerPatch, NewCustomer, DEFAULT_STATUS};
use crate::models::requests::address::RequestCreateAddress;
use crate::utils::{date_format, double_option};

static EDU_EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.edu$").unwrap());
static UNIVERSITY_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2,4}\d{3,4}$").unwrap());

#[derive(Deserialize, Validate, Debug, Default)]
pub struct RequestCreateCustomer {
    #[validate(length(min = 1, message = "first_name must not be empty"))]
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    #[validate(length(min = 1, message = "last_name must not be empty"))]
    pub last_name: Option<String>,
    #[validate(regex(
        path = "UNIVERSITY_ID",
        message = "university_id must be 2-4 uppercase letters followed by 3-4 digits"
    ))]
    pub university_id: Option<String>,
    #[validate(regex(path = "EDU_EMAIL", message = "email must end in .edu"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    pub address: Option<Option<Vec<RequestCreateAddress>>>,
    #[validate(custom = "validate_birth_date")]
    pub birth_date: Option<String>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    #[validate(length(min = 1, message = "status must not be empty"))]
    pub status: Option<Option<String>>,
}

#[derive(Deserialize, Validate, Debug, Default)]
pub struct RequestUpdateCustomer {
    #[serde(default, deserialize_with = "double_option::deserialize")]
    #[validate(length(min = 1, message = "first_name must not be empty"))]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    pub middle_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    #[validate(length(min = 1, message = "last_name must not be empty"))]
    pub last_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    #[validate(regex(
        path = "UNIVERSITY_ID",
        message = "university_id must be 2-4 uppercase letters followed by 3-4 digits"
    ))]
    pub university_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    #[validate(regex(path = "EDU_EMAIL", message = "email must end in .edu"))]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    pub address: Option<Option<Vec<RequestCreateAddress>>>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    #[validate(custom = "validate_birth_date")]
    pub birth_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    #[validate(length(min = 1, message = "status must not be empty"))]
    pub status: Option<Option<String>>,
}

impl RequestCreateCustomer {
    /// Validates the payload and issues the new customer's id and timestamps.
    pub fn validate_create(self, issuer: &dyn Issuer) -> Result<Customer, Errors> {
        let new_customer = self.into_new_customer()?;

        Ok(Customer::create(new_customer, issuer))
    }

    pub fn into_new_customer(mut self) -> Result<NewCustomer, Errors> {
        self.email = self.email.map(|email| email.trim().to_string());

        let mut extractor = FieldValidator::validate(&self);

        let first_name = extractor.extract("first_name", self.first_name);
        let last_name = extractor.extract("last_name", self.last_name);
        let email = extractor.extract("email", self.email);
        // may be omitted for their defaults, but not sent as null
        extractor.reject_null("address", &self.address);
        extractor.reject_null("status", &self.status);
        let address = collect_addresses(&mut extractor, self.address.flatten().unwrap_or_default());
        extractor.check()?;

        Ok(NewCustomer {
            first_name,
            middle_name: self.middle_name,
            last_name,
            university_id: self.university_id,
            email,
            phone: self.phone,
            address,
            birth_date: self
                .birth_date
                .and_then(|birth_date| date_format::parse(&birth_date).ok()),
            status: self
                .status
                .flatten()
                .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        })
    }
}

impl RequestUpdateCustomer {
    pub fn validate_update(mut self) -> Result<CustomerPatch, Errors> {
        if let Some(Some(email)) = self.email.as_mut() {
            *email = email.trim().to_string();
        }

        let mut extractor = FieldValidator::validate(&self);

        extractor.reject_null("first_name", &self.first_name);
        extractor.reject_null("last_name", &self.last_name);
        extractor.reject_null("email", &self.email);
        extractor.reject_null("address", &self.address);
        extractor.reject_null("status", &self.status);

        let address = self
            .address
            .flatten()
            .map(|addresses| collect_addresses(&mut extractor, addresses));
        extractor.check()?;

        Ok(CustomerPatch {
            first_name: self.first_name.flatten(),
            middle_name: self.middle_name,
            last_name: self.last_name.flatten(),
            university_id: self.university_id,
            email: self.email.flatten(),
            phone: self.phone,
            address,
            birth_date: self.birth_date.map(|birth_date| {
                birth_date.and_then(|birth_date| date_format::parse(&birth_date).ok())
            }),
            status: self.status.flatten(),
        })
    }
}

fn collect_addresses(
    extractor: &mut FieldValidator,
    addresses: Vec<RequestCreateAddress>,
) -> Vec<NewAddress> {
    addresses
        .into_iter()
        .enumerate()
        .filter_map(|(index, address)| {
            extractor.absorb(&format!("address[{}]", index), address.into_new_address())
        })
        .collect()
}

fn validate_birth_date(birth_date: &str) -> Result<(), validator::ValidationError> {
    if date_format::parse(birth_date).is_ok() {
        return Ok(());
    }

    let err = validator::ValidationError {
        code: Cow::from("invalid_birth_date"),
        message: Some(Cow::from("birth_date must be a calendar date in YYYY-MM-DD format")),
        params: Default::default(),
    };

    return Err(err);
}
