mod model;
mod repository;

pub use model::SearchDocumentDB;
pub use repository::SearchRepository;
