//! PostgreSQL implementation of NotificationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use talent_core::{
    NotificationRepository, RepoResult, Snowflake, TaskType, UnreadNotification,
};

use crate::mappers::NotificationInsert;
use crate::models::NotificationModel;

use super::error::map_db_error;

const NOTIFICATION_COLUMNS: &str =
    "id, candidate_id, message_id, task_type, read_at, created_at";

/// PostgreSQL implementation of NotificationRepository
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    /// Create a new PgNotificationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self))]
    async fn create(&self, notification: &UnreadNotification) -> RepoResult<()> {
        let insert = NotificationInsert::new(notification);

        // One ledger row per message; a repeat insert is a no-op
        sqlx::query(
            r#"
            INSERT INTO unread_notifications (id, candidate_id, message_id, task_type,
                                              read_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (message_id) DO NOTHING
            "#,
        )
        .bind(insert.id)
        .bind(insert.candidate_id)
        .bind(insert.message_id)
        .bind(insert.task_type)
        .bind(notification.read_at)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_read_for_messages(
        &self,
        message_ids: &[Snowflake],
        now: DateTime<Utc>,
    ) -> RepoResult<u64> {
        if message_ids.is_empty() {
            return Ok(0);
        }

        let ids: Vec<i64> = message_ids.iter().map(|s| s.into_inner()).collect();

        let result = sqlx::query(
            r#"
            UPDATE unread_notifications
            SET read_at = $2
            WHERE message_id = ANY($1) AND read_at IS NULL
            "#,
        )
        .bind(&ids)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn list_unread_for_candidate(
        &self,
        candidate_id: Snowflake,
        limit: i64,
    ) -> RepoResult<Vec<UnreadNotification>> {
        let limit = limit.clamp(1, 100);

        let results = sqlx::query_as::<_, NotificationModel>(&format!(
            r#"
            SELECT {NOTIFICATION_COLUMNS} FROM unread_notifications
            WHERE candidate_id = $1 AND read_at IS NULL
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#
        ))
        .bind(candidate_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results
            .into_iter()
            .map(UnreadNotification::try_from)
            .collect()
    }

    #[instrument(skip(self))]
    async fn count_unread_by_type(
        &self,
        candidate_id: Snowflake,
    ) -> RepoResult<Vec<(TaskType, i64)>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT task_type, COUNT(*) FROM unread_notifications
            WHERE candidate_id = $1 AND read_at IS NULL
            GROUP BY task_type
            "#,
        )
        .bind(candidate_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter()
            .map(|(task_type, count)| Ok((task_type.parse::<TaskType>()?, count)))
            .collect()
    }
}
