pub mod admin_auth;
pub mod admin_products;
pub mod admin_users;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod health;
pub mod products;
pub mod profile;
