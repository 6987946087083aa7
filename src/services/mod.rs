pub mod auth;
pub mod categories;
pub mod email;
pub mod inventory;
pub mod products;
