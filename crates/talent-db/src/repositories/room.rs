//! PostgreSQL implementation of RoomRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use talent_core::{RepoResult, Room, RoomRepository, Snowflake};

use crate::mappers::RoomInsert;
use crate::models::RoomModel;

use super::error::{map_db_error, room_not_found};

const ROOM_COLUMNS: &str = "id, candidate_id, company_group_id, related_job_posting_id, \
                            participant_company_users, created_at, updated_at";

/// PostgreSQL implementation of RoomRepository
#[derive(Clone)]
pub struct PgRoomRepository {
    pool: PgPool,
}

impl PgRoomRepository {
    /// Create a new PgRoomRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PgRoomRepository {
    #[instrument(skip(self))]
    async fn create(&self, room: &Room) -> RepoResult<()> {
        let insert = RoomInsert::new(room);

        sqlx::query(
            r#"
            INSERT INTO rooms (id, candidate_id, company_group_id, related_job_posting_id,
                               participant_company_users, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(insert.id)
        .bind(insert.candidate_id)
        .bind(insert.company_group_id)
        .bind(insert.related_job_posting_id)
        .bind(&insert.participant_company_users)
        .bind(room.created_at)
        .bind(room.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Room>> {
        let result = sqlx::query_as::<_, RoomModel>(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Room::from))
    }

    #[instrument(skip(self))]
    async fn find_by_participants(
        &self,
        candidate_id: Snowflake,
        company_group_id: Snowflake,
        related_job_posting_id: Option<Snowflake>,
    ) -> RepoResult<Option<Room>> {
        let result = sqlx::query_as::<_, RoomModel>(&format!(
            r#"
            SELECT {ROOM_COLUMNS} FROM rooms
            WHERE candidate_id = $1
              AND company_group_id = $2
              AND related_job_posting_id IS NOT DISTINCT FROM $3
            "#
        ))
        .bind(candidate_id.into_inner())
        .bind(company_group_id.into_inner())
        .bind(related_job_posting_id.map(Snowflake::into_inner))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Room::from))
    }

    #[instrument(skip(self))]
    async fn list_for_candidate(&self, candidate_id: Snowflake) -> RepoResult<Vec<Room>> {
        let results = sqlx::query_as::<_, RoomModel>(&format!(
            r#"
            SELECT {ROOM_COLUMNS} FROM rooms
            WHERE candidate_id = $1
            ORDER BY updated_at DESC, id DESC
            "#
        ))
        .bind(candidate_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Room::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_for_groups(&self, group_ids: &[Snowflake]) -> RepoResult<Vec<Room>> {
        let ids: Vec<i64> = group_ids.iter().map(|s| s.into_inner()).collect();

        let results = sqlx::query_as::<_, RoomModel>(&format!(
            r#"
            SELECT {ROOM_COLUMNS} FROM rooms
            WHERE company_group_id = ANY($1)
            ORDER BY updated_at DESC, id DESC
            "#
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Room::from).collect())
    }

    #[instrument(skip(self))]
    async fn add_participant(
        &self,
        room_id: Snowflake,
        company_user_id: Snowflake,
    ) -> RepoResult<()> {
        // Append-only: the WHERE clause makes a repeat append a no-op
        sqlx::query(
            r#"
            UPDATE rooms
            SET participant_company_users = array_append(participant_company_users, $2)
            WHERE id = $1 AND NOT ($2 = ANY(participant_company_users))
            "#,
        )
        .bind(room_id.into_inner())
        .bind(company_user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn touch(&self, room_id: Snowflake, now: DateTime<Utc>) -> RepoResult<()> {
        let result = sqlx::query("UPDATE rooms SET updated_at = $2 WHERE id = $1")
            .bind(room_id.into_inner())
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(room_not_found(room_id));
        }

        Ok(())
    }
}
