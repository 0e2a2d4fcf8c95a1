use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::issuer::Issuer;
use crate::models::address::{Address, AddressPatch, NewAddress};
use crate::repositories::Entity;
use crate::utils;

pub const DEFAULT_STATUS: &'static str = "active";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Customer {
    pub customer_id: Uuid,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub university_id: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub address: Vec<Address>,
    pub birth_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated create payload.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub university_id: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub address: Vec<NewAddress>,
    pub birth_date: Option<NaiveDate>,
    pub status: String,
}

/// Validated partial update.
///
/// Outer `None` means the field was omitted. For nullable fields the inner
/// `None` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerPatch {
    pub first_name: Option<String>,
    pub middle_name: Option<Option<String>>,
    pub last_name: Option<String>,
    pub university_id: Option<Option<String>>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub address: Option<Vec<NewAddress>>,
    pub birth_date: Option<Option<NaiveDate>>,
    pub status: Option<String>,
}

impl Entity for Customer {
    const KIND: &'static str = "customer";

    fn id(&self) -> Uuid {
        self.customer_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Customer {
    pub fn create(new: NewCustomer, issuer: &dyn Issuer) -> Customer {
        let now = issuer.now();

        Customer {
            customer_id: issuer.next_id(),
            first_name: new.first_name,
            middle_name: new.middle_name,
            last_name: new.last_name,
            university_id: new.university_id,
            email: new.email,
            phone: new.phone,
            address: issue_addresses(new.address, issuer, now),
            birth_date: new.birth_date,
            status: new.status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies `patch` on top of `self`. An address list in the patch replaces
    /// the stored list wholesale.
    pub fn merge(mut self, patch: CustomerPatch, issuer: &dyn Issuer) -> Customer {
        let now = issuer.now();

        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(middle_name) = patch.middle_name {
            self.middle_name = middle_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(university_id) = patch.university_id {
            self.university_id = university_id;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(address) = patch.address {
            self.address = issue_addresses(address, issuer, now);
        }
        if let Some(birth_date) = patch.birth_date {
            self.birth_date = birth_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }

        self.touch(now);
        self
    }

    pub fn find_address(&self, address_id: Uuid) -> Result<&Address, ApiError> {
        self.address
            .iter()
            .find(|address| address.address_id == address_id)
            .ok_or_else(|| ApiError::not_found("address", address_id))
    }

    /// Appends an address issued by [`Address::create`].
    pub fn add_address(&mut self, address: Address) {
        self.touch(address.updated_at);
        self.address.push(address);
    }

    pub fn update_address(
        &mut self,
        address_id: Uuid,
        patch: AddressPatch,
        issuer: &dyn Issuer,
    ) -> Result<Address, ApiError> {
        let index = self.address_index(address_id)?;

        let merged = self.address[index].clone().merge(patch, issuer);
        self.address[index] = merged.clone();
        self.touch(merged.updated_at);
        Ok(merged)
    }

    pub fn remove_address(
        &mut self,
        address_id: Uuid,
        issuer: &dyn Issuer,
    ) -> Result<Address, ApiError> {
        let index = self.address_index(address_id)?;

        let removed = self.address.remove(index);
        self.touch(issuer.now());
        Ok(removed)
    }

    fn address_index(&self, address_id: Uuid) -> Result<usize, ApiError> {
        self.address
            .iter()
            .position(|address| address.address_id == address_id)
            .ok_or_else(|| ApiError::not_found("address", address_id))
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = utils::advance(self.updated_at, now);
    }
}

fn issue_addresses(
    addresses: Vec<NewAddress>,
    issuer: &dyn Issuer,
    now: DateTime<Utc>,
) -> Vec<Address> {
    addresses
        .into_iter()
        .map(|new| Address::issue(new, issuer.next_id(), now))
        .collect()
}
