//! PostgreSQL implementation of CandidateRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use talent_core::{Candidate, CandidateRepository, RepoResult, Snowflake};

use crate::models::CandidateModel;

use super::error::map_db_error;

const CANDIDATE_COLUMNS: &str =
    "id, email, family_name, given_name, notification_preference, created_at";

/// PostgreSQL implementation of CandidateRepository
#[derive(Clone)]
pub struct PgCandidateRepository {
    pool: PgPool,
}

impl PgCandidateRepository {
    /// Create a new PgCandidateRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateRepository for PgCandidateRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Candidate>> {
        let result = sqlx::query_as::<_, CandidateModel>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Candidate::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Candidate>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw_ids: Vec<i64> = ids.iter().map(|s| s.into_inner()).collect();

        let results = sqlx::query_as::<_, CandidateModel>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE id = ANY($1)"
        ))
        .bind(&raw_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Candidate::try_from).collect()
    }
}
