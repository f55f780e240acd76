//! Task service - derives company task boards and candidate unread
//! summaries at read time
//!
//! Boards are never persisted. Every request reclassifies the source
//! rows against "now", and each of the four source queries degrades
//! independently: a failing query logs a warning and leaves its buckets
//! inactive instead of failing the whole board.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{instrument, warn};

use talent_cache::BoardKey;
use talent_core::{
    AgeBucket, Application, CallerIdentity, CompanyTaskBoard, Snowflake, TaskBucket, TaskEntry,
    interview_result_overdue,
};

use crate::dto::mappers::unread_summary;
use crate::dto::responses::{TaskBoardResponse, UnreadSummaryResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// How many recent ledger entries the candidate summary surfaces
const RECENT_UNREAD_LIMIT: i64 = 5;

/// Service for derived task views
pub struct TaskService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TaskService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Compute the company dashboard for the caller's group set
    #[instrument(skip(self, caller))]
    pub async fn company_task_board(
        &self,
        caller: &CallerIdentity,
    ) -> ServiceResult<TaskBoardResponse> {
        let CallerIdentity::CompanyUser { group_ids, .. } = caller else {
            return Err(ServiceError::permission_denied("company group membership"));
        };

        let cache_key = BoardKey::new(group_ids.clone());
        if let Some(cache) = self.ctx.board_cache() {
            if let Some(board) = cache.get(&cache_key) {
                return Ok(board.into());
            }
        }

        let (active_postings, sent_apps, leads, responded_apps) = tokio::join!(
            self.ctx.job_posting_repo().count_active_for_groups(group_ids),
            self.ctx.application_repo().list_sent_for_groups(group_ids),
            self.ctx.message_repo().find_candidate_leads(group_ids),
            self.ctx.application_repo().list_responded_for_groups(group_ids),
        );

        let now = Utc::now();
        let mut board = CompanyTaskBoard::default();

        match active_postings {
            Ok(count) => board.no_job_postings = TaskBucket::flag(count == 0),
            Err(err) => warn!(error = %err, "job posting count unavailable, bucket degraded"),
        }

        let sent_apps = match sent_apps {
            Ok(apps) => apps,
            Err(err) => {
                warn!(error = %err, "sent applications unavailable, buckets degraded");
                Vec::new()
            }
        };
        let responded_apps = match responded_apps {
            Ok(apps) => apps,
            Err(err) => {
                warn!(error = %err, "responded applications unavailable, bucket degraded");
                Vec::new()
            }
        };

        if !sent_apps.is_empty() || !responded_apps.is_empty() {
            match self.application_context(&sent_apps, &responded_apps).await {
                Ok((candidates, titles)) => {
                    let (new_entries, overdue_entries) =
                        partition_applications(&sent_apps, &candidates, &titles, now);
                    board.new_applications = TaskBucket::newest_first(new_entries);
                    board.overdue_applications = TaskBucket::oldest_first(overdue_entries);

                    let interview_entries = responded_apps
                        .iter()
                        .filter(|app| interview_result_overdue(app.updated_at, now))
                        .filter_map(|app| application_entry(app, app.updated_at, &candidates, &titles))
                        .collect();
                    board.unregistered_interview_results =
                        TaskBucket::oldest_first(interview_entries);
                }
                Err(err) => {
                    warn!(error = %err, "application context unavailable, buckets degraded");
                }
            }
        }

        match leads {
            Ok(leads) => {
                let mut new_entries = Vec::new();
                let mut overdue_entries = Vec::new();
                for lead in leads {
                    match AgeBucket::classify(lead.anchored_at, now) {
                        AgeBucket::New => new_entries.push(lead.into_entry()),
                        AgeBucket::Overdue => overdue_entries.push(lead.into_entry()),
                        AgeBucket::Grace => {}
                    }
                }
                board.new_messages = TaskBucket::newest_first(new_entries);
                board.overdue_messages = TaskBucket::oldest_first(overdue_entries);
            }
            Err(err) => warn!(error = %err, "candidate leads unavailable, buckets degraded"),
        }

        if let Some(cache) = self.ctx.board_cache() {
            cache.set(cache_key, board.clone());
        }

        Ok(board.into())
    }

    /// Candidate-side unread summary from the notification ledger
    #[instrument(skip(self, caller))]
    pub async fn candidate_unread_summary(
        &self,
        caller: &CallerIdentity,
    ) -> ServiceResult<UnreadSummaryResponse> {
        let CallerIdentity::Candidate { candidate_id } = caller else {
            return Err(ServiceError::permission_denied("candidate identity"));
        };

        let (totals, recent) = tokio::join!(
            self.ctx.notification_repo().count_unread_by_type(*candidate_id),
            self.ctx
                .notification_repo()
                .list_unread_for_candidate(*candidate_id, RECENT_UNREAD_LIMIT),
        );

        let totals = totals.unwrap_or_else(|err| {
            warn!(error = %err, "unread counts unavailable");
            Vec::new()
        });
        let recent = recent.unwrap_or_else(|err| {
            warn!(error = %err, "recent unread entries unavailable");
            Vec::new()
        });

        Ok(unread_summary(totals, recent))
    }

    /// Candidate names and posting titles referenced by the application
    /// buckets, fetched in two batched lookups
    async fn application_context(
        &self,
        sent: &[Application],
        responded: &[Application],
    ) -> ServiceResult<(HashMap<Snowflake, String>, HashMap<Snowflake, String>)> {
        let mut candidate_ids: Vec<Snowflake> = sent
            .iter()
            .chain(responded.iter())
            .map(|app| app.candidate_id)
            .collect();
        candidate_ids.sort_unstable();
        candidate_ids.dedup();

        let mut posting_ids: Vec<Snowflake> = sent
            .iter()
            .chain(responded.iter())
            .map(|app| app.job_posting_id)
            .collect();
        posting_ids.sort_unstable();
        posting_ids.dedup();

        let (candidates, titles) = tokio::join!(
            self.ctx.candidate_repo().find_by_ids(&candidate_ids),
            self.ctx.job_posting_repo().titles_by_ids(&posting_ids),
        );

        let candidates = candidates?
            .into_iter()
            .map(|c| (c.id, c.display_name()))
            .collect();
        Ok((candidates, titles?))
    }
}

fn application_entry(
    app: &Application,
    anchored_at: chrono::DateTime<Utc>,
    candidates: &HashMap<Snowflake, String>,
    titles: &HashMap<Snowflake, String>,
) -> Option<TaskEntry> {
    // An application whose candidate row is gone is dropped from the
    // board rather than shown nameless
    let candidate_name = candidates.get(&app.candidate_id)?.clone();
    Some(TaskEntry {
        candidate_name,
        job_title: titles.get(&app.job_posting_id).cloned(),
        anchored_at,
    })
}

fn partition_applications(
    apps: &[Application],
    candidates: &HashMap<Snowflake, String>,
    titles: &HashMap<Snowflake, String>,
    now: chrono::DateTime<Utc>,
) -> (Vec<TaskEntry>, Vec<TaskEntry>) {
    let mut new_entries = Vec::new();
    let mut overdue_entries = Vec::new();
    for app in apps {
        let bucket = AgeBucket::classify(app.applied_at, now);
        let target = match bucket {
            AgeBucket::New => &mut new_entries,
            AgeBucket::Overdue => &mut overdue_entries,
            AgeBucket::Grace => continue,
        };
        if let Some(entry) = application_entry(app, app.applied_at, candidates, titles) {
            target.push(entry);
        }
    }
    (new_entries, overdue_entries)
}
