//! SQLite storage for Fitfolio.
//!
//! Implements the repository traits declared in `fitfolio-core` on top of
//! Diesel + SQLite. Reads go to an r2d2 pool; writes are serialized through
//! a single-writer actor so SQLite never sees two concurrent write
//! transactions.

pub mod db;
pub mod errors;
pub mod schema;

pub mod goals;
pub mod measurements;
pub mod search;
pub mod users;

pub use errors::StorageError;
