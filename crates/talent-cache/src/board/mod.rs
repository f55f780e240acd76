//! Task board query cache

mod board_cache;

pub use board_cache::{BoardKey, TaskBoardCache};
