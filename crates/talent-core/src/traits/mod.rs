//! Domain traits - contracts implemented by outer layers

mod capabilities;
mod repositories;

pub use capabilities::{FileStorage, MailRequest, MailTransport};
pub use repositories::{
    ApplicationRepository, CandidateRepository, CompanyGroupRepository, JobPostingRepository,
    MessageQuery, MessageRepository, NotificationRepository, RepoResult, RoomRepository,
};
