pub mod address;
pub mod customer;
pub mod health;
pub mod requests;
pub mod responses;
