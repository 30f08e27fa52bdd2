pub mod auth;
pub mod income;
pub mod orders;
pub mod products;
