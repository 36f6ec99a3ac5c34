mod model;
mod repository;

pub use model::MeasurementDB;
pub use repository::MeasurementRepository;
