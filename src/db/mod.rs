pub mod auth;
pub mod connection;
pub mod inquiries;
pub mod listings;

pub use connection::{init_db, Database};
