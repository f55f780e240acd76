//! PostgreSQL implementation of ApplicationRepository
//!
//! Applications are owned by the application flow; this subsystem only
//! reads them for task derivation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use talent_core::{Application, ApplicationRepository, RepoResult, Snowflake};

use crate::models::ApplicationModel;

use super::error::map_db_error;

const APPLICATION_COLUMNS: &str =
    "id, candidate_id, job_posting_id, company_group_id, status, applied_at, updated_at";

/// PostgreSQL implementation of ApplicationRepository
#[derive(Clone)]
pub struct PgApplicationRepository {
    pool: PgPool,
}

impl PgApplicationRepository {
    /// Create a new PgApplicationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn list_by_status(
        &self,
        group_ids: &[Snowflake],
        status: &str,
    ) -> RepoResult<Vec<Application>> {
        let ids: Vec<i64> = group_ids.iter().map(|s| s.into_inner()).collect();

        let results = sqlx::query_as::<_, ApplicationModel>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS} FROM applications
            WHERE company_group_id = ANY($1) AND status = $2
            "#
        ))
        .bind(&ids)
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Application::try_from).collect()
    }
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    #[instrument(skip(self))]
    async fn list_sent_for_groups(&self, group_ids: &[Snowflake]) -> RepoResult<Vec<Application>> {
        self.list_by_status(group_ids, "SENT").await
    }

    #[instrument(skip(self))]
    async fn list_responded_for_groups(
        &self,
        group_ids: &[Snowflake],
    ) -> RepoResult<Vec<Application>> {
        self.list_by_status(group_ids, "RESPONDED").await
    }
}
