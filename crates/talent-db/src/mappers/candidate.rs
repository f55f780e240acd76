//! Candidate model -> entity mapper

use talent_core::{Candidate, DomainError, Snowflake};

use crate::models::CandidateModel;

impl TryFrom<CandidateModel> for Candidate {
    type Error = DomainError;

    fn try_from(model: CandidateModel) -> Result<Self, Self::Error> {
        Ok(Candidate {
            id: Snowflake::new(model.id),
            email: model.email,
            family_name: model.family_name,
            given_name: model.given_name,
            notification_preference: model
                .notification_preference
                .as_deref()
                .map(str::parse)
                .transpose()?,
            created_at: model.created_at,
        })
    }
}
