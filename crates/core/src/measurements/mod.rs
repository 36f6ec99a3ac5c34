//! Measurements module - body measurement logging.

mod measurements_model;
mod measurements_service;
mod measurements_traits;

pub use measurements_model::*;
pub use measurements_service::MeasurementService;
pub use measurements_traits::{MeasurementRepositoryTrait, MeasurementServiceTrait};
