//! Room service - conversation listing and access checks

use tracing::instrument;

use talent_core::{CallerIdentity, DomainError, Room, Snowflake};

use crate::dto::mappers::RoomWithUnread;
use crate::dto::responses::RoomSummaryResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Service for room queries
pub struct RoomService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoomService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List the caller's rooms, most recently updated first, each with
    /// the caller's unread count (inbound SENT messages).
    #[instrument(skip(self, caller))]
    pub async fn list_rooms(
        &self,
        caller: &CallerIdentity,
    ) -> ServiceResult<Vec<RoomSummaryResponse>> {
        let rooms = match caller {
            CallerIdentity::Candidate { candidate_id } => {
                self.ctx.room_repo().list_for_candidate(*candidate_id).await?
            }
            CallerIdentity::CompanyUser { group_ids, .. } => {
                self.ctx.room_repo().list_for_groups(group_ids).await?
            }
        };

        let counterpart = caller.counterpart_type();
        let mut summaries = Vec::with_capacity(rooms.len());
        for room in rooms {
            let unread_count = self
                .ctx
                .message_repo()
                .count_unread(room.id, counterpart)
                .await?;
            summaries.push(RoomWithUnread { room, unread_count }.into());
        }

        Ok(summaries)
    }

    /// Load a room and verify the caller belongs to it.
    ///
    /// A candidate outside the room gets `NotRoomParticipant`; a company
    /// user without the room's group gets `MissingGroupPermission`.
    pub(crate) async fn ensure_access(
        &self,
        caller: &CallerIdentity,
        room_id: Snowflake,
    ) -> ServiceResult<Room> {
        let room = self
            .ctx
            .room_repo()
            .find_by_id(room_id)
            .await?
            .ok_or(DomainError::RoomNotFound(room_id))?;

        if !caller.can_access(&room) {
            let err = match caller {
                CallerIdentity::Candidate { .. } => DomainError::NotRoomParticipant,
                CallerIdentity::CompanyUser { .. } => {
                    DomainError::MissingGroupPermission(room.company_group_id)
                }
            };
            return Err(err.into());
        }

        Ok(room)
    }
}
