pub mod auth;
pub mod product;
pub mod sms_code;
pub mod user;

pub use auth::*;
pub use product::*;
pub use sms_code::*;
pub use user::*;
