//! Database models - SQLx-compatible structs for PostgreSQL tables

mod application;
mod candidate;
mod company;
mod job_posting;
mod lead;
mod message;
mod notification;
mod room;

pub use application::ApplicationModel;
pub use candidate::CandidateModel;
pub use company::CompanyGroupModel;
pub use job_posting::JobPostingModel;
pub use lead::CandidateLeadModel;
pub use message::MessageModel;
pub use notification::NotificationModel;
pub use room::RoomModel;
