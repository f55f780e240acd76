//! # talent-core
//!
//! Domain layer for the recruitment messaging engine: entities, value
//! objects, repository and capability traits, and the pure task
//! classification logic. This crate has zero dependencies on
//! infrastructure (database, web framework, mail, etc.).

pub mod entities;
pub mod error;
pub mod tasks;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Application, ApplicationStatus, Candidate, CompanyGroup, JobPosting, JobStatus, Message,
    MessageSender, MessageStatus, MessageType, NotificationPreference, Room, SenderType, TaskType,
    UnreadNotification,
};
pub use error::DomainError;
pub use tasks::{
    interview_result_overdue, AgeBucket, CandidateLead, CompanyTaskBoard, TaskBucket, TaskEntry,
    TaskKind, INTERVIEW_OVERDUE_AFTER, MAX_TASK_ENTRIES, NEW_WINDOW, OVERDUE_AFTER,
};
pub use traits::{
    ApplicationRepository, CandidateRepository, CompanyGroupRepository, FileStorage, JobPostingRepository,
    MailRequest, MailTransport, MessageQuery, MessageRepository, NotificationRepository, RepoResult,
    RoomRepository,
};
pub use value_objects::{
    AttachmentPolicy, CallerIdentity, Snowflake, SnowflakeGenerator, SnowflakeParseError,
};
