//! Application model -> entity mapper

use talent_core::{Application, DomainError, Snowflake};

use crate::models::ApplicationModel;

impl TryFrom<ApplicationModel> for Application {
    type Error = DomainError;

    fn try_from(model: ApplicationModel) -> Result<Self, Self::Error> {
        Ok(Application {
            id: Snowflake::new(model.id),
            candidate_id: Snowflake::new(model.candidate_id),
            job_posting_id: Snowflake::new(model.job_posting_id),
            company_group_id: Snowflake::new(model.company_group_id),
            status: model.status.parse()?,
            applied_at: model.applied_at,
            updated_at: model.updated_at,
        })
    }
}
