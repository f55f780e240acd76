//! Entity to DTO mappers

use talent_core::{
    CompanyTaskBoard, Message, Room, TaskBucket, TaskEntry, TaskKind, TaskType,
    UnreadNotification,
};

use super::responses::{
    MessageResponse, RoomSummaryResponse, TaskBoardResponse, TaskBucketResponse,
    TaskEntryResponse, UnreadCountResponse, UnreadNotificationResponse, UnreadSummaryResponse,
};

/// A room paired with the caller's unread count
#[derive(Debug, Clone)]
pub struct RoomWithUnread {
    pub room: Room,
    pub unread_count: i64,
}

impl From<RoomWithUnread> for RoomSummaryResponse {
    fn from(value: RoomWithUnread) -> Self {
        let room = value.room;
        Self {
            id: room.id.to_string(),
            candidate_id: room.candidate_id.to_string(),
            company_group_id: room.company_group_id.to_string(),
            related_job_posting_id: room.related_job_posting_id.map(|id| id.to_string()),
            unread_count: value.unread_count,
            created_at: room.created_at,
            updated_at: room.updated_at,
        }
    }
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        let sender_id = match message.sender {
            talent_core::MessageSender::Candidate(id) => id.to_string(),
            talent_core::MessageSender::CompanyGroup(id) => id.to_string(),
        };
        Self {
            id: message.id.to_string(),
            room_id: message.room_id.to_string(),
            subject: message.subject,
            content: message.content,
            message_type: message.message_type.as_str().to_string(),
            sender_type: message.sender.sender_type().as_str().to_string(),
            sender_id,
            status: message.status.as_str().to_string(),
            sent_at: message.sent_at,
            read_at: message.read_at,
            file_urls: message.file_urls,
        }
    }
}

impl From<TaskEntry> for TaskEntryResponse {
    fn from(entry: TaskEntry) -> Self {
        Self {
            candidate_name: entry.candidate_name,
            job_title: entry.job_title,
            anchored_at: entry.anchored_at,
        }
    }
}

fn bucket_response(kind: TaskKind, bucket: TaskBucket) -> TaskBucketResponse {
    TaskBucketResponse {
        kind: kind.as_str().to_string(),
        active: bucket.active,
        entries: bucket.entries.into_iter().map(Into::into).collect(),
    }
}

impl From<CompanyTaskBoard> for TaskBoardResponse {
    fn from(board: CompanyTaskBoard) -> Self {
        Self {
            no_job_postings: bucket_response(TaskKind::NoJobPostings, board.no_job_postings),
            new_applications: bucket_response(TaskKind::NewApplication, board.new_applications),
            overdue_applications: bucket_response(
                TaskKind::OverdueApplication,
                board.overdue_applications,
            ),
            new_messages: bucket_response(TaskKind::NewMessage, board.new_messages),
            overdue_messages: bucket_response(TaskKind::OverdueMessage, board.overdue_messages),
            unregistered_interview_results: bucket_response(
                TaskKind::UnregisteredInterviewResult,
                board.unregistered_interview_results,
            ),
        }
    }
}

impl From<UnreadNotification> for UnreadNotificationResponse {
    fn from(notification: UnreadNotification) -> Self {
        Self {
            message_id: notification.message_id.to_string(),
            task_type: notification.task_type.as_str().to_string(),
            created_at: notification.created_at,
        }
    }
}

/// Build an unread summary from ledger counts and recent entries
pub fn unread_summary(
    totals: Vec<(TaskType, i64)>,
    recent: Vec<UnreadNotification>,
) -> UnreadSummaryResponse {
    UnreadSummaryResponse {
        totals: totals
            .into_iter()
            .map(|(task_type, count)| UnreadCountResponse {
                task_type: task_type.as_str().to_string(),
                count,
            })
            .collect(),
        recent: recent.into_iter().map(Into::into).collect(),
    }
}
