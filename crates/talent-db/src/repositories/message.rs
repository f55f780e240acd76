//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use talent_core::{
    CandidateLead, Message, MessageQuery, MessageRepository, RepoResult, SenderType, Snowflake,
};

use crate::mappers::MessageInsert;
use crate::models::{CandidateLeadModel, MessageModel};

use super::error::map_db_error;

const MESSAGE_COLUMNS: &str = "id, room_id, subject, content, message_type, sender_type, \
                               sender_candidate_id, sender_company_group_id, status, sent_at, \
                               read_at, file_urls";

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self))]
    async fn create(&self, message: &Message) -> RepoResult<()> {
        let insert = MessageInsert::new(message);

        sqlx::query(
            r#"
            INSERT INTO messages (id, room_id, subject, content, message_type, sender_type,
                                  sender_candidate_id, sender_company_group_id, status, sent_at,
                                  read_at, file_urls)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(insert.id)
        .bind(insert.room_id)
        .bind(insert.subject)
        .bind(insert.content)
        .bind(insert.message_type)
        .bind(insert.sender_type)
        .bind(insert.sender_candidate_id)
        .bind(insert.sender_company_group_id)
        .bind(insert.status)
        .bind(message.sent_at)
        .bind(message.read_at)
        .bind(insert.file_urls)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Message::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_by_room(
        &self,
        room_id: Snowflake,
        query: &MessageQuery,
    ) -> RepoResult<Vec<Message>> {
        let limit = query.limit.clamp(1, 100);

        let results = match (query.before, query.after) {
            (Some(before), None) => {
                // Fetch messages before cursor (scrolling up)
                sqlx::query_as::<_, MessageModel>(&format!(
                    r#"
                    SELECT {MESSAGE_COLUMNS} FROM messages
                    WHERE room_id = $1 AND id < $2
                    ORDER BY sent_at DESC, id DESC
                    LIMIT $3
                    "#
                ))
                .bind(room_id.into_inner())
                .bind(before.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            (None, Some(after)) => {
                // Fetch messages after cursor (scrolling down)
                sqlx::query_as::<_, MessageModel>(&format!(
                    r#"
                    SELECT {MESSAGE_COLUMNS} FROM messages
                    WHERE room_id = $1 AND id > $2
                    ORDER BY sent_at ASC, id ASC
                    LIMIT $3
                    "#
                ))
                .bind(room_id.into_inner())
                .bind(after.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            _ => {
                // Fetch latest messages (no cursor)
                sqlx::query_as::<_, MessageModel>(&format!(
                    r#"
                    SELECT {MESSAGE_COLUMNS} FROM messages
                    WHERE room_id = $1
                    ORDER BY sent_at DESC, id DESC
                    LIMIT $2
                    "#
                ))
                .bind(room_id.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        results.into_iter().map(Message::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn mark_room_read(
        &self,
        room_id: Snowflake,
        sender_type: SenderType,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<Snowflake>> {
        // Selection is evaluated against database state at call time;
        // already-read rows are untouched, so the call is idempotent
        let ids: Vec<i64> = sqlx::query_scalar(
            r#"
            UPDATE messages
            SET status = 'READ', read_at = $3
            WHERE room_id = $1 AND sender_type = $2 AND status = 'SENT'
            RETURNING id
            "#,
        )
        .bind(room_id.into_inner())
        .bind(sender_type.as_str())
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(Snowflake::new).collect())
    }

    #[instrument(skip(self))]
    async fn count_unread(&self, room_id: Snowflake, sender_type: SenderType) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM messages
            WHERE room_id = $1 AND sender_type = $2 AND status = 'SENT'
            "#,
        )
        .bind(room_id.into_inner())
        .bind(sender_type.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn find_candidate_leads(
        &self,
        group_ids: &[Snowflake],
    ) -> RepoResult<Vec<CandidateLead>> {
        let ids: Vec<i64> = group_ids.iter().map(|s| s.into_inner()).collect();

        let results = sqlx::query_as::<_, CandidateLeadModel>(
            r#"
            SELECT m.room_id,
                   r.candidate_id,
                   c.email,
                   c.family_name,
                   c.given_name,
                   j.title AS job_title,
                   m.sent_at AS anchored_at
            FROM messages m
            JOIN rooms r ON r.id = m.room_id
            JOIN candidates c ON c.id = r.candidate_id
            LEFT JOIN job_postings j ON j.id = r.related_job_posting_id
            WHERE r.company_group_id = ANY($1)
              AND m.sender_type = 'CANDIDATE'
              AND m.status IN ('SENT', 'READ')
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(CandidateLead::from).collect())
    }
}
