//! Users module - account records and profile management.
//!
//! Credential verification and password hashing live in the server layer;
//! core only stores the resulting hash.

mod users_model;
mod users_service;
mod users_traits;

pub use users_model::*;
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
