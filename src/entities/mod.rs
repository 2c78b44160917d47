pub mod products;
pub mod sms_codes;
pub mod users;

pub use products as product_entity;
pub use sms_codes as sms_code_entity;
pub use users as user_entity;
