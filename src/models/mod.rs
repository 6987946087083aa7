pub mod category;
pub mod inventory;
pub mod pagination;
pub mod product;
pub mod user;
