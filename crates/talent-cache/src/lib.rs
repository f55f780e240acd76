//! # talent-cache
//!
//! In-process, time-bounded caching for read-side queries.
//!
//! Caching here is an explicit, injected component with `get`/`set`/
//! `evict` and a TTL: callers decide what is cached and for how long.
//! Derived data (task boards) may be cached at the query layer, but is
//! never persisted.

pub mod board;
pub mod ttl;

pub use board::{BoardKey, TaskBoardCache};
pub use ttl::TtlCache;
