//! Job posting model -> entity mapper

use talent_core::{DomainError, JobPosting, Snowflake};

use crate::models::JobPostingModel;

impl TryFrom<JobPostingModel> for JobPosting {
    type Error = DomainError;

    fn try_from(model: JobPostingModel) -> Result<Self, Self::Error> {
        Ok(JobPosting {
            id: Snowflake::new(model.id),
            company_group_id: Snowflake::new(model.company_group_id),
            title: model.title,
            status: model.status.parse()?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
