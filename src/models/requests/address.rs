use serde::Deserialize;
use validator_derive::Validate;

use crate::errors::{Errors, FieldValidator};
use crate::models::address::{AddressPatch, NewAddress};
use crate::utils::double_option;

#[derive(Deserialize, Validate, Debug, Default, Clone)]
pub struct RequestCreateAddress {
    #[validate(length(min = 1, message = "street must not be empty"))]
    pub street: Option<String>,
    #[validate(length(min = 1, message = "city must not be empty"))]
    pub city: Option<String>,
    #[validate(length(min = 1, message = "state must not be empty"))]
    pub state: Option<String>,
    #[validate(length(min = 1, message = "postal_code must not be empty"))]
    pub postal_code: Option<String>,
    #[validate(length(min = 1, message = "country must not be empty"))]
    pub country: Option<String>,
}

#[derive(Deserialize, Validate, Debug, Default)]
pub struct RequestUpdateAddress {
    #[serde(default, deserialize_with = "double_option::deserialize")]
    #[validate(length(min = 1, message = "street must not be empty"))]
    pub street: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    #[validate(length(min = 1, message = "city must not be empty"))]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    #[validate(length(min = 1, message = "state must not be empty"))]
    pub state: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    #[validate(length(min = 1, message = "postal_code must not be empty"))]
    pub postal_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    #[validate(length(min = 1, message = "country must not be empty"))]
    pub country: Option<Option<String>>,
}

impl RequestCreateAddress {
    pub fn into_new_address(self) -> Result<NewAddress, Errors> {
        let mut extractor = FieldValidator::validate(&self);

        let street = extractor.extract("street", self.street);
        let city = extractor.extract("city", self.city);
        let state = extractor.extract("state", self.state);
        let postal_code = extractor.extract("postal_code", self.postal_code);
        let country = extractor.extract("country", self.country);
        extractor.check()?;

        Ok(NewAddress {
            street,
            city,
            state,
            postal_code,
            country,
        })
    }
}

impl RequestUpdateAddress {
    /// Every address field is required, so a patch may omit one but never null it.
    pub fn validate_update(self) -> Result<AddressPatch, Errors> {
        let mut extractor = FieldValidator::validate(&self);

        extractor.reject_null("street", &self.street);
        extractor.reject_null("city", &self.city);
        extractor.reject_null("state", &self.state);
        extractor.reject_null("postal_code", &self.postal_code);
        extractor.reject_null("country", &self.country);
        extractor.check()?;

        Ok(AddressPatch {
            street: self.street.flatten(),
            city: self.city.flatten(),
            state: self.state.flatten(),
            postal_code: self.postal_code.flatten(),
            country: self.country.flatten(),
        })
    }
}
