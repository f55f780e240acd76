//! Candidate lead row -> task engine input

use talent_core::{Candidate, CandidateLead, Snowflake};

use crate::models::CandidateLeadModel;

impl From<CandidateLeadModel> for CandidateLead {
    fn from(model: CandidateLeadModel) -> Self {
        let candidate_name = Candidate::format_display_name(
            model.family_name.as_deref(),
            model.given_name.as_deref(),
            &model.email,
        );
        CandidateLead {
            room_id: Snowflake::new(model.room_id),
            candidate_id: Snowflake::new(model.candidate_id),
            candidate_name,
            job_title: model.job_title,
            anchored_at: model.anchored_at,
        }
    }
}
