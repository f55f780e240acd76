//! Unread notification entity <-> model mapper

use talent_core::{DomainError, Snowflake, UnreadNotification};

use crate::models::NotificationModel;

impl TryFrom<NotificationModel> for UnreadNotification {
    type Error = DomainError;

    fn try_from(model: NotificationModel) -> Result<Self, Self::Error> {
        Ok(UnreadNotification {
            id: Snowflake::new(model.id),
            candidate_id: Snowflake::new(model.candidate_id),
            message_id: Snowflake::new(model.message_id),
            task_type: model.task_type.parse()?,
            read_at: model.read_at,
            created_at: model.created_at,
        })
    }
}

/// Convert UnreadNotification entity reference to values for insertion
pub struct NotificationInsert {
    pub id: i64,
    pub candidate_id: i64,
    pub message_id: i64,
    pub task_type: &'static str,
}

impl NotificationInsert {
    pub fn new(notification: &UnreadNotification) -> Self {
        Self {
            id: notification.id.into_inner(),
            candidate_id: notification.candidate_id.into_inner(),
            message_id: notification.message_id.into_inner(),
            task_type: notification.task_type.as_str(),
        }
    }
}
