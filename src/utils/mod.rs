pub mod clock;
pub mod code_generator;
pub mod jwt;
pub mod phone;

pub use clock::{Clock, ZonedClock};
pub use code_generator::{CodeGenerator, RandomCodeGenerator, generate_four_digit_code};
pub use jwt::*;
pub use phone::*;
