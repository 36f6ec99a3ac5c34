//! Search module - per-user search documents.
//!
//! Mutating services do not write the index themselves; they emit a domain
//! event and the hosting runtime's indexing worker renders the record into a
//! [`SearchDocument`] through [`SearchService`]. Index unavailability never
//! blocks a primary write.

mod search_model;
mod search_service;
mod search_traits;

pub use search_model::*;
pub use search_service::{SearchService, SearchServiceTrait};
pub use search_traits::SearchRepositoryTrait;
