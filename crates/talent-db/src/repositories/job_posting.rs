//! PostgreSQL implementation of JobPostingRepository

use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::instrument;

use talent_core::{JobPosting, JobPostingRepository, RepoResult, Snowflake};

use crate::models::JobPostingModel;

use super::error::map_db_error;

const JOB_POSTING_COLUMNS: &str = "id, company_group_id, title, status, created_at, updated_at";

/// PostgreSQL implementation of JobPostingRepository
#[derive(Clone)]
pub struct PgJobPostingRepository {
    pool: PgPool,
}

impl PgJobPostingRepository {
    /// Create a new PgJobPostingRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobPostingRepository for PgJobPostingRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<JobPosting>> {
        let result = sqlx::query_as::<_, JobPostingModel>(&format!(
            "SELECT {JOB_POSTING_COLUMNS} FROM job_postings WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(JobPosting::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn count_active_for_groups(&self, group_ids: &[Snowflake]) -> RepoResult<i64> {
        let ids: Vec<i64> = group_ids.iter().map(|s| s.into_inner()).collect();

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM job_postings
            WHERE company_group_id = ANY($1)
              AND status IN ('PUBLISHED', 'PENDING_APPROVAL')
            "#,
        )
        .bind(&ids)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn titles_by_ids(&self, ids: &[Snowflake]) -> RepoResult<HashMap<Snowflake, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let raw_ids: Vec<i64> = ids.iter().map(|s| s.into_inner()).collect();

        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, title FROM job_postings WHERE id = ANY($1)")
                .bind(&raw_ids)
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|(id, title)| (Snowflake::new(id), title))
            .collect())
    }
}
