pub mod connection;
pub mod repository;

pub use connection::{DbPool, create_pool, run_migrations};
pub use repository::{Repository, SeaOrmRepository};
