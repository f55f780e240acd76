//! PostgreSQL implementation of CompanyGroupRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use talent_core::{CompanyGroup, CompanyGroupRepository, RepoResult, Snowflake};

use crate::models::CompanyGroupModel;

use super::error::map_db_error;

/// PostgreSQL implementation of CompanyGroupRepository
#[derive(Clone)]
pub struct PgCompanyGroupRepository {
    pool: PgPool,
}

impl PgCompanyGroupRepository {
    /// Create a new PgCompanyGroupRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyGroupRepository for PgCompanyGroupRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<CompanyGroup>> {
        let result = sqlx::query_as::<_, CompanyGroupModel>(
            "SELECT id, name, created_at FROM company_groups WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(CompanyGroup::from))
    }
}
