//! Notification dispatcher - best-effort email fan-out
//!
//! Sending a message never waits on the mail provider. The send path
//! enqueues a `DispatchJob` into a bounded in-process outbox and
//! returns; a worker loop drains the queue and performs the actual
//! dispatch with a deadline. A full queue drops the job with a warning
//! rather than blocking the write path, and a dispatch failure is
//! logged, never surfaced to the sender.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{info, instrument, warn};

use talent_cache::TtlCache;
use talent_core::{DomainError, MailRequest, Snowflake};

use super::context::ServiceContext;

/// How long a dispatched message id is remembered for deduplication
const DEDUPE_TTL: Duration = Duration::from_secs(600);
const DEDUPE_CAPACITY: usize = 4096;

/// Longest message excerpt included in the notification mail
const PREVIEW_MAX_BYTES: usize = 120;

/// One queued notification
#[derive(Debug, Clone)]
pub struct DispatchJob {
    pub message_id: Snowflake,
    pub room_id: Snowflake,
    pub candidate_id: Snowflake,
    pub company_group_id: Snowflake,
}

/// Sending half of the outbox queue
#[derive(Clone)]
pub struct DispatcherHandle {
    tx: mpsc::Sender<DispatchJob>,
}

impl DispatcherHandle {
    /// Enqueue a job without blocking. A full queue drops the job.
    pub fn enqueue(&self, job: DispatchJob) {
        if let Err(err) = self.tx.try_send(job) {
            warn!(error = %err, "notification outbox full, dropping dispatch job");
        }
    }
}

/// Performs the actual mail dispatch for queued jobs
pub struct NotificationDispatcher {
    ctx: ServiceContext,
    seen: TtlCache<i64, ()>,
}

impl NotificationDispatcher {
    pub fn new(ctx: ServiceContext) -> Self {
        Self {
            ctx,
            seen: TtlCache::new(DEDUPE_TTL, DEDUPE_CAPACITY),
        }
    }

    /// Create the bounded outbox channel
    pub fn channel(capacity: usize) -> (DispatcherHandle, mpsc::Receiver<DispatchJob>) {
        let (tx, rx) = mpsc::channel(capacity);
        (DispatcherHandle { tx }, rx)
    }

    /// Dispatch a single job: preference-gated, deduplicated by message
    /// id, bounded by the configured deadline.
    #[instrument(skip(self), fields(message_id = %job.message_id))]
    pub async fn dispatch(&self, job: &DispatchJob) -> Result<(), DomainError> {
        // At-least-once delivery from the queue; the dedupe set makes
        // a redelivered job a no-op
        if self.seen.contains(&job.message_id.into_inner()) {
            return Ok(());
        }

        let candidate = self
            .ctx
            .candidate_repo()
            .find_by_id(job.candidate_id)
            .await?
            .ok_or(DomainError::CandidateNotFound(job.candidate_id))?;

        if !candidate.wants_email() {
            info!(candidate_id = %job.candidate_id, "candidate opted out, skipping mail");
            self.seen.set(job.message_id.into_inner(), ());
            return Ok(());
        }

        let company_name = self
            .ctx
            .company_group_repo()
            .find_by_id(job.company_group_id)
            .await?
            .map(|group| group.name)
            .unwrap_or_default();

        let message = self
            .ctx
            .message_repo()
            .find_by_id(job.message_id)
            .await?
            .ok_or(DomainError::MessageNotFound(job.message_id))?;

        let config = self.ctx.mailer_config();
        let mut variables = HashMap::new();
        variables.insert("recipient_name".to_string(), candidate.display_name());
        variables.insert("company_name".to_string(), company_name);
        variables.insert(
            "message_preview".to_string(),
            message.preview(PREVIEW_MAX_BYTES).to_string(),
        );
        variables.insert(
            "room_url".to_string(),
            format!("{}/{}", config.room_link_base, job.room_id),
        );

        let request = MailRequest {
            to: candidate.email.clone(),
            template_id: config.message_template_id.clone(),
            variables,
        };

        let deadline = Duration::from_secs(config.dispatch_timeout_secs);
        match timeout(deadline, self.ctx.mail_transport().send(request)).await {
            Ok(Ok(())) => {
                self.seen.set(job.message_id.into_inner(), ());
                info!(candidate_id = %job.candidate_id, "notification mail dispatched");
                Ok(())
            }
            Ok(Err(err)) => Err(err),
            Err(_) => Err(DomainError::MailError(format!(
                "dispatch timed out after {}s",
                config.dispatch_timeout_secs
            ))),
        }
    }
}

/// Worker loop draining the outbox queue
pub struct OutboxWorker {
    dispatcher: NotificationDispatcher,
    rx: mpsc::Receiver<DispatchJob>,
}

impl OutboxWorker {
    pub fn new(dispatcher: NotificationDispatcher, rx: mpsc::Receiver<DispatchJob>) -> Self {
        Self { dispatcher, rx }
    }

    /// Run until the sending half is dropped. Failures are logged and
    /// the loop keeps going; one bad job never stalls the queue.
    pub async fn run(mut self) {
        while let Some(job) = self.rx.recv().await {
            if let Err(err) = self.dispatcher.dispatch(&job).await {
                warn!(
                    message_id = %job.message_id,
                    error = %err,
                    "notification dispatch failed"
                );
            }
        }
        info!("notification outbox closed, worker exiting");
    }
}
