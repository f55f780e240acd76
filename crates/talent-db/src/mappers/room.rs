//! Room entity <-> model mapper

use talent_core::{Room, Snowflake};

use crate::models::RoomModel;

impl From<RoomModel> for Room {
    fn from(model: RoomModel) -> Self {
        Room {
            id: Snowflake::new(model.id),
            candidate_id: Snowflake::new(model.candidate_id),
            company_group_id: Snowflake::new(model.company_group_id),
            related_job_posting_id: model.related_job_posting_id.map(Snowflake::new),
            participant_company_users: model
                .participant_company_users
                .into_iter()
                .map(Snowflake::new)
                .collect(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert Room entity reference to values for database insertion
pub struct RoomInsert {
    pub id: i64,
    pub candidate_id: i64,
    pub company_group_id: i64,
    pub related_job_posting_id: Option<i64>,
    pub participant_company_users: Vec<i64>,
}

impl RoomInsert {
    pub fn new(room: &Room) -> Self {
        Self {
            id: room.id.into_inner(),
            candidate_id: room.candidate_id.into_inner(),
            company_group_id: room.company_group_id.into_inner(),
            related_job_posting_id: room.related_job_posting_id.map(Snowflake::into_inner),
            participant_company_users: room
                .participant_company_users
                .iter()
                .map(|s| s.into_inner())
                .collect(),
        }
    }
}
