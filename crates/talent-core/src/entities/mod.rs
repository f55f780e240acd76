//! Domain entities

mod application;
mod candidate;
mod company;
mod job_posting;
mod message;
mod notification;
mod room;

pub use application::{Application, ApplicationStatus};
pub use candidate::{Candidate, NotificationPreference};
pub use company::CompanyGroup;
pub use job_posting::{JobPosting, JobStatus};
pub use message::{Message, MessageSender, MessageStatus, MessageType, SenderType};
pub use notification::{TaskType, UnreadNotification};
pub use room::Room;
