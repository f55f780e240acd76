//! Message service - sending, listing and read-state transitions
//!
//! The send path fails closed: validation and attachment uploads happen
//! before the message row is written, and everything after the write
//! (participant tracking, ledger rows, mail dispatch, room recency) is
//! best-effort and never fails the send.

use base64::Engine;
use chrono::Utc;
use tracing::{instrument, warn};
use validator::Validate;

use talent_core::{
    AttachmentPolicy, CallerIdentity, DomainError, Message, MessageQuery, MessageSender, Room,
    Snowflake, UnreadNotification,
};

use crate::dto::requests::{SendMessageRequest, StartConversationRequest};
use crate::dto::responses::{MarkReadResponse, MessageResponse};

use super::context::ServiceContext;
use super::dispatcher::DispatchJob;
use super::error::{ServiceError, ServiceResult};
use super::room::RoomService;

/// Service for message operations
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
    attachment_policy: AttachmentPolicy,
}

impl<'a> MessageService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self {
            ctx,
            attachment_policy: AttachmentPolicy::new(),
        }
    }

    /// Send a message into an existing room the caller belongs to
    #[instrument(skip(self, caller, request), fields(room_id = %room_id))]
    pub async fn send_to_room(
        &self,
        caller: &CallerIdentity,
        room_id: Snowflake,
        request: SendMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        let room = RoomService::new(self.ctx)
            .ensure_access(caller, room_id)
            .await?;
        self.send(caller, &room, request).await
    }

    /// Open (or reuse) the room for a counterpart and send the first
    /// message. The room for the (candidate, company group, posting?)
    /// triple is created lazily; a repeat call reuses the existing one.
    #[instrument(skip(self, caller, request))]
    pub async fn start_conversation(
        &self,
        caller: &CallerIdentity,
        request: StartConversationRequest,
    ) -> ServiceResult<MessageResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let counterpart_id = parse_snowflake(&request.counterpart_id)?;
        let related_job_posting_id = request
            .related_job_posting_id
            .as_deref()
            .map(parse_snowflake)
            .transpose()?;

        let (candidate_id, company_group_id) = match caller {
            CallerIdentity::Candidate { candidate_id } => (*candidate_id, counterpart_id),
            CallerIdentity::CompanyUser { group_ids, .. } => {
                let group_id = self
                    .resolve_sending_group(group_ids, related_job_posting_id)
                    .await?;
                (counterpart_id, group_id)
            }
        };

        if self
            .ctx
            .candidate_repo()
            .find_by_id(candidate_id)
            .await?
            .is_none()
        {
            return Err(DomainError::CandidateNotFound(candidate_id).into());
        }
        if self
            .ctx
            .company_group_repo()
            .find_by_id(company_group_id)
            .await?
            .is_none()
        {
            return Err(DomainError::CompanyGroupNotFound(company_group_id).into());
        }

        let room = match self
            .ctx
            .room_repo()
            .find_by_participants(candidate_id, company_group_id, related_job_posting_id)
            .await?
        {
            Some(room) => room,
            None => {
                let room = Room::new(
                    self.ctx.generate_id(),
                    candidate_id,
                    company_group_id,
                    related_job_posting_id,
                    Utc::now(),
                );
                self.ctx.room_repo().create(&room).await?;
                room
            }
        };

        self.send(caller, &room, request.message).await
    }

    /// List messages in a room. Listing never changes read state; the
    /// counterpart's unread markers survive until an explicit mark-read.
    #[instrument(skip(self, caller, query), fields(room_id = %room_id))]
    pub async fn list_messages(
        &self,
        caller: &CallerIdentity,
        room_id: Snowflake,
        query: &MessageQuery,
    ) -> ServiceResult<Vec<MessageResponse>> {
        RoomService::new(self.ctx)
            .ensure_access(caller, room_id)
            .await?;

        let messages = self.ctx.message_repo().list_by_room(room_id, query).await?;
        Ok(messages.into_iter().map(Into::into).collect())
    }

    /// Flip every SENT message from the caller's counterpart to READ.
    /// Idempotent: a second call finds nothing left to flip.
    #[instrument(skip(self, caller), fields(room_id = %room_id))]
    pub async fn mark_room_read(
        &self,
        caller: &CallerIdentity,
        room_id: Snowflake,
    ) -> ServiceResult<MarkReadResponse> {
        RoomService::new(self.ctx)
            .ensure_access(caller, room_id)
            .await?;

        let now = Utc::now();
        let marked = self
            .ctx
            .message_repo()
            .mark_room_read(room_id, caller.counterpart_type(), now)
            .await?;

        // The ledger only tracks company-to-candidate messages, so only
        // a candidate's read clears ledger rows
        if matches!(caller, CallerIdentity::Candidate { .. }) && !marked.is_empty() {
            if let Err(err) = self
                .ctx
                .notification_repo()
                .mark_read_for_messages(&marked, now)
                .await
            {
                warn!(room_id = %room_id, error = %err, "failed to settle unread ledger");
            }
        }

        Ok(MarkReadResponse {
            messages_marked: marked.len() as u64,
        })
    }

    /// Shared send path. The caller's access to `room` must already be
    /// verified.
    async fn send(
        &self,
        caller: &CallerIdentity,
        room: &Room,
        request: SendMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        // Attachments are decoded, validated and uploaded before any row
        // is written; a bad attachment aborts the whole send
        let mut file_urls = Vec::with_capacity(request.attachments.len());
        for attachment in &request.attachments {
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(&attachment.data)
                .map_err(|e| {
                    DomainError::ValidationError(format!("invalid base64 attachment: {e}"))
                })?;
            self.attachment_policy
                .validate(&attachment.content_type, bytes.len())?;
            let url = self
                .ctx
                .file_storage()
                .store(&attachment.filename, &attachment.content_type, &bytes)
                .await?;
            file_urls.push(url);
        }

        let sender = match caller {
            CallerIdentity::Candidate { candidate_id } => MessageSender::Candidate(*candidate_id),
            CallerIdentity::CompanyUser { .. } => {
                MessageSender::CompanyGroup(room.company_group_id)
            }
        };

        let now = Utc::now();
        let message = Message::new(
            self.ctx.generate_id(),
            room.id,
            sender,
            request.message_type,
            request.content,
            request.subject,
            file_urls,
            now,
        );
        self.ctx.message_repo().create(&message).await?;

        // Everything past the message write is best-effort
        if let CallerIdentity::CompanyUser {
            company_user_id, ..
        } = caller
        {
            if let Err(err) = self
                .ctx
                .room_repo()
                .add_participant(room.id, *company_user_id)
                .await
            {
                warn!(room_id = %room.id, error = %err, "failed to record room participant");
            }

            let notification = UnreadNotification::new(
                self.ctx.generate_id(),
                room.candidate_id,
                message.id,
                message.message_type,
                now,
            );
            if let Err(err) = self.ctx.notification_repo().create(&notification).await {
                warn!(message_id = %message.id, error = %err, "failed to write unread ledger row");
            }

            if let Some(dispatcher) = self.ctx.dispatcher() {
                dispatcher.enqueue(DispatchJob {
                    message_id: message.id,
                    room_id: room.id,
                    candidate_id: room.candidate_id,
                    company_group_id: room.company_group_id,
                });
            }
        }

        if let Err(err) = self.ctx.room_repo().touch(room.id, now).await {
            warn!(room_id = %room.id, error = %err, "failed to bump room recency");
        }

        Ok(message.into())
    }

    /// Determine which company group a company-side sender acts for.
    /// A posting-scoped conversation uses the posting's group; otherwise
    /// the caller must hold exactly one group.
    async fn resolve_sending_group(
        &self,
        group_ids: &[Snowflake],
        related_job_posting_id: Option<Snowflake>,
    ) -> ServiceResult<Snowflake> {
        if let Some(posting_id) = related_job_posting_id {
            let posting = self
                .ctx
                .job_posting_repo()
                .find_by_id(posting_id)
                .await?
                .ok_or(DomainError::JobPostingNotFound(posting_id))?;
            if !group_ids.contains(&posting.company_group_id) {
                return Err(
                    DomainError::MissingGroupPermission(posting.company_group_id).into(),
                );
            }
            return Ok(posting.company_group_id);
        }

        match group_ids {
            [only] => Ok(*only),
            [] => Err(ServiceError::permission_denied("company group membership")),
            _ => Err(ServiceError::validation(
                "related_job_posting_id is required when the caller belongs to multiple groups",
            )),
        }
    }
}

fn parse_snowflake(value: &str) -> Result<Snowflake, ServiceError> {
    Snowflake::parse(value).map_err(|_| ServiceError::validation(format!("invalid id: {value}")))
}
