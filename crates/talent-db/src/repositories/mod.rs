//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in
//! talent-core. Each repository handles database operations for a
//! specific domain entity.

mod application;
mod candidate;
mod company;
mod error;
mod job_posting;
mod message;
mod notification;
mod room;

pub use application::PgApplicationRepository;
pub use candidate::PgCandidateRepository;
pub use company::PgCompanyGroupRepository;
pub use job_posting::PgJobPostingRepository;
pub use message::PgMessageRepository;
pub use notification::PgNotificationRepository;
pub use room::PgRoomRepository;
