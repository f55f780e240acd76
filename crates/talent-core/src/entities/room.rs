//! Room entity - a conversation thread between one candidate and one
//! company group, optionally scoped to a job posting

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Room entity
///
/// Created lazily on the first message of a (candidate, company group,
/// job posting?) triple and never deleted. `updated_at` is bumped on
/// every new message so rooms can be ordered by recency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: Snowflake,
    pub candidate_id: Snowflake,
    pub company_group_id: Snowflake,
    pub related_job_posting_id: Option<Snowflake>,
    /// Company-side participants, append-only
    pub participant_company_users: Vec<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Create a new Room
    pub fn new(
        id: Snowflake,
        candidate_id: Snowflake,
        company_group_id: Snowflake,
        related_job_posting_id: Option<Snowflake>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            candidate_id,
            company_group_id,
            related_job_posting_id,
            participant_company_users: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a company-side participant if not already present.
    /// Returns true when the list changed.
    pub fn add_participant(&mut self, company_user_id: Snowflake) -> bool {
        if self.participant_company_users.contains(&company_user_id) {
            return false;
        }
        self.participant_company_users.push(company_user_id);
        true
    }

    /// Bump the recency timestamp
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_room() -> Room {
        Room::new(
            Snowflake::new(1),
            Snowflake::new(100),
            Snowflake::new(200),
            Some(Snowflake::new(300)),
            Utc::now(),
        )
    }

    #[test]
    fn test_participant_list_is_append_only_and_deduplicated() {
        let mut room = sample_room();
        assert!(room.add_participant(Snowflake::new(7)));
        assert!(!room.add_participant(Snowflake::new(7)));
        assert!(room.add_participant(Snowflake::new(8)));
        assert_eq!(
            room.participant_company_users,
            vec![Snowflake::new(7), Snowflake::new(8)]
        );
    }

    #[test]
    fn test_touch_bumps_updated_at() {
        let mut room = sample_room();
        let later = room.updated_at + chrono::Duration::seconds(30);
        room.touch(later);
        assert_eq!(room.updated_at, later);
    }
}
