//! Domain event plumbing for the server runtime.
//!
//! Core services emit [`DomainEvent`]s through a channel-backed sink; a
//! background worker consumes them and keeps the search index in sync.
//! Indexing is best-effort: a failure is logged and the primary write is
//! unaffected.

mod sink;
mod worker;

pub use sink::ChannelEventSink;
pub use worker::{search_index_worker, SearchIndexDeps};
