pub mod auth;
pub mod customers;
pub mod orders;
pub mod patch;
pub mod products;
