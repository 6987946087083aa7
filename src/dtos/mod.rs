pub mod auth;
pub mod category;
pub mod email;
pub mod inventory;
pub mod product;
