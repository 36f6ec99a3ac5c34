//! Goals module - domain models, progress computation, services, and traits.
//!
//! A goal tracks a numeric (or custom) target a user works toward. The
//! interesting parts live in [`progress`]: the pure progress calculator and
//! the status transition policy. Everything else is store plumbing.

mod goals_model;
mod goals_service;
mod goals_traits;
pub mod progress;

pub use goals_model::*;
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
