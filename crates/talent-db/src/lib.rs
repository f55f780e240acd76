//! # talent-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository
//! traits defined in `talent-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Model ↔ entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use talent_db::pool::{create_pool, PoolConfig};
//! use talent_db::repositories::PgRoomRepository;
//! use talent_core::RoomRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::default()).await?;
//!     let room_repo = PgRoomRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, PgPool, PoolConfig};
pub use repositories::{
    PgApplicationRepository, PgCandidateRepository, PgCompanyGroupRepository,
    PgJobPostingRepository, PgMessageRepository, PgNotificationRepository, PgRoomRepository,
};
