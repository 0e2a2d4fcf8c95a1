use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::issuer::Issuer;
use crate::utils;

/// Mailing address owned by a customer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Address {
    pub address_id: Uuid,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated create payload.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// Validated partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressPatch {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl Address {
    pub fn create(new: NewAddress, issuer: &dyn Issuer) -> Address {
        Address::issue(new, issuer.next_id(), issuer.now())
    }

    pub(crate) fn issue(new: NewAddress, address_id: Uuid, now: DateTime<Utc>) -> Address {
        Address {
            address_id,
            street: new.street,
            city: new.city,
            state: new.state,
            postal_code: new.postal_code,
            country: new.country,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn merge(mut self, patch: AddressPatch, issuer: &dyn Issuer) -> Address {
        if let Some(street) = patch.street {
            self.street = street;
        }
        if let Some(city) = patch.city {
            self.city = city;
        }
        if let Some(state) = patch.state {
            self.state = state;
        }
        if let Some(postal_code) = patch.postal_code {
            self.postal_code = postal_code;
        }
        if let Some(country) = patch.country {
            self.country = country;
        }
        self.updated_at = utils::advance(self.updated_at, issuer.now());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issuer::SteppingIssuer;
    use chrono::TimeZone;

    fn broadway() -> NewAddress {
        NewAddress {
            street: "123 Broadway Ave".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            postal_code: "10027".to_string(),
            country: "USA".to_string(),
        }
    }

    fn issuer() -> SteppingIssuer {
        SteppingIssuer::starting_at(Utc.with_ymd_and_hms(2025, 9, 30, 10, 20, 30).unwrap())
    }

    #[test]
    fn create_sets_both_timestamps() {
        let address = Address::create(broadway(), &issuer());

        assert_eq!(address.created_at, address.updated_at);
        assert_eq!(address.city, "New York");
    }

    #[test]
    fn merge_overwrites_only_present_fields() {
        let issuer = issuer();
        let address = Address::create(broadway(), &issuer);

        let merged = address.clone().merge(
            AddressPatch {
                city: Some("Boston".to_string()),
                state: Some("MA".to_string()),
                ..Default::default()
            },
            &issuer,
        );

        assert_eq!(merged.address_id, address.address_id);
        assert_eq!(merged.created_at, address.created_at);
        assert!(merged.updated_at > address.updated_at);
        assert_eq!(merged.street, "123 Broadway Ave");
        assert_eq!(merged.city, "Boston");
        assert_eq!(merged.state, "MA");
        assert_eq!(merged.postal_code, "10027");
    }
}
