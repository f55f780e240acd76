//! Message entity <-> model mapper

use talent_core::{DomainError, Message, MessageSender, SenderType, Snowflake};

use crate::models::MessageModel;

impl TryFrom<MessageModel> for Message {
    type Error = DomainError;

    fn try_from(model: MessageModel) -> Result<Self, Self::Error> {
        let sender = match model.sender_type.parse::<SenderType>()? {
            SenderType::Candidate => MessageSender::Candidate(
                model
                    .sender_candidate_id
                    .map(Snowflake::new)
                    .ok_or_else(|| {
                        DomainError::InternalError(format!(
                            "message {} has sender_type CANDIDATE but no candidate id",
                            model.id
                        ))
                    })?,
            ),
            SenderType::CompanyUser => MessageSender::CompanyGroup(
                model
                    .sender_company_group_id
                    .map(Snowflake::new)
                    .ok_or_else(|| {
                        DomainError::InternalError(format!(
                            "message {} has sender_type COMPANY_USER but no group id",
                            model.id
                        ))
                    })?,
            ),
        };

        Ok(Message {
            id: Snowflake::new(model.id),
            room_id: Snowflake::new(model.room_id),
            subject: model.subject,
            content: model.content,
            message_type: model.message_type.parse()?,
            sender,
            status: model.status.parse()?,
            sent_at: model.sent_at,
            read_at: model.read_at,
            file_urls: model.file_urls,
        })
    }
}

/// Convert Message entity reference to values for database insertion
pub struct MessageInsert<'a> {
    pub id: i64,
    pub room_id: i64,
    pub subject: Option<&'a str>,
    pub content: &'a str,
    pub message_type: &'static str,
    pub sender_type: &'static str,
    pub sender_candidate_id: Option<i64>,
    pub sender_company_group_id: Option<i64>,
    pub status: &'static str,
    pub file_urls: &'a [String],
}

impl<'a> MessageInsert<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self {
            id: message.id.into_inner(),
            room_id: message.room_id.into_inner(),
            subject: message.subject.as_deref(),
            content: &message.content,
            message_type: message.message_type.as_str(),
            sender_type: message.sender_type().as_str(),
            sender_candidate_id: message.sender.candidate_id().map(Snowflake::into_inner),
            sender_company_group_id: message.sender.company_group_id().map(Snowflake::into_inner),
            status: message.status.as_str(),
            file_urls: &message.file_urls,
        }
    }
}
