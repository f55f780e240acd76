//! Time-bounded cache for derived company task boards.
//!
//! Boards stay derived-only: this cache holds a recently computed
//! result for a few seconds so dashboard polling does not re-run the
//! four source queries on every request. Nothing here is durable.

use std::time::Duration;

use crate::ttl::TtlCache;
use talent_core::{CompanyTaskBoard, Snowflake};

/// Cache key: the authorized group set, order-insensitive
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardKey(Vec<Snowflake>);

impl BoardKey {
    pub fn new(mut group_ids: Vec<Snowflake>) -> Self {
        group_ids.sort_unstable();
        group_ids.dedup();
        Self(group_ids)
    }
}

/// TTL cache over computed task boards
pub struct TaskBoardCache {
    inner: TtlCache<BoardKey, CompanyTaskBoard>,
}

impl TaskBoardCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            inner: TtlCache::new(ttl, capacity),
        }
    }

    pub fn get(&self, key: &BoardKey) -> Option<CompanyTaskBoard> {
        self.inner.get(key)
    }

    pub fn set(&self, key: BoardKey, board: CompanyTaskBoard) {
        self.inner.set(key, board);
    }

    pub fn evict(&self, key: &BoardKey) {
        self.inner.evict(key);
    }
}
