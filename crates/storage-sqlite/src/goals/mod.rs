mod model;
mod repository;

pub use model::GoalDB;
pub use repository::GoalRepository;
