pub mod auth_service;
pub mod product_service;

pub use auth_service::*;
pub use product_service::*;
