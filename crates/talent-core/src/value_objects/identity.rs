//! Caller identity resolved by the upstream session capability
//!
//! The messaging core never validates credentials itself; it receives a
//! verified identity and authorizes room access against it.

use crate::entities::{Room, SenderType};
use crate::value_objects::Snowflake;

/// A verified caller: either a candidate or a company-side user with the
/// company groups they are authorized over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallerIdentity {
    Candidate {
        candidate_id: Snowflake,
    },
    CompanyUser {
        company_user_id: Snowflake,
        group_ids: Vec<Snowflake>,
    },
}

impl CallerIdentity {
    /// The side of the conversation this caller writes from
    pub fn sender_type(&self) -> SenderType {
        match self {
            Self::Candidate { .. } => SenderType::Candidate,
            Self::CompanyUser { .. } => SenderType::CompanyUser,
        }
    }

    /// The side whose messages are "inbound" for this caller
    pub fn counterpart_type(&self) -> SenderType {
        match self {
            Self::Candidate { .. } => SenderType::CompanyUser,
            Self::CompanyUser { .. } => SenderType::Candidate,
        }
    }

    /// Check membership over a room: a candidate must own the room's
    /// candidate side, a company user must hold permission over the
    /// room's company group.
    pub fn can_access(&self, room: &Room) -> bool {
        match self {
            Self::Candidate { candidate_id } => room.candidate_id == *candidate_id,
            Self::CompanyUser { group_ids, .. } => group_ids.contains(&room.company_group_id),
        }
    }
}
