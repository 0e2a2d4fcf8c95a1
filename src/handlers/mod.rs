pub mod address;
pub mod customer;
pub mod health;
