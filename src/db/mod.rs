//! Database access layer
//!
//! SQLite via sqlx; one submodule per table group with thin query functions.
//! Schema creation is idempotent and runs at startup.

pub mod favourites;
pub mod init;
pub mod models;
pub mod sessions;
pub mod stations;
pub mod users;

pub use init::init_database;
