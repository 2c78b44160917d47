pub mod auth;
pub mod cors;

pub use auth::{BearerToken, BearerTokenMiddleware};
pub use cors::create_cors;
