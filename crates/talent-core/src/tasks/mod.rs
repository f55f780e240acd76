//! Task derivation primitives
//!
//! Tasks are never persisted. Bucket membership depends only on the
//! distance between a source-of-truth timestamp and "now", so every
//! board is recomputed from those timestamps at read time. A stored
//! task table would need a sweeper to age rows in and out; recomputing
//! trades a few index scans for the absence of staleness.

use chrono::{DateTime, Duration, Utc};

use crate::value_objects::Snowflake;

/// Items younger than this are "new"
pub const NEW_WINDOW: Duration = match Duration::new(24 * 3600, 0) {
    Some(d) => d,
    None => panic!("invalid duration"),
};

/// Items at least this old are "overdue"
pub const OVERDUE_AFTER: Duration = match Duration::new(48 * 3600, 0) {
    Some(d) => d,
    None => panic!("invalid duration"),
};

/// Responded applications older than this need an interview result
pub const INTERVIEW_OVERDUE_AFTER: Duration = match Duration::new(72 * 3600, 0) {
    Some(d) => d,
    None => panic!("invalid duration"),
};

/// Maximum summarized entries surfaced per bucket
pub const MAX_TASK_ENTRIES: usize = 5;

/// Age classification of a single item.
///
/// The `[24h, 48h)` band is deliberately neither new nor overdue. The
/// asymmetric thresholds are long-standing product behavior and must
/// not be collapsed into a single cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBucket {
    New,
    Grace,
    Overdue,
}

impl AgeBucket {
    pub fn classify(anchored_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let age = now - anchored_at;
        if age < NEW_WINDOW {
            Self::New
        } else if age >= OVERDUE_AFTER {
            Self::Overdue
        } else {
            Self::Grace
        }
    }
}

/// Whether a responded application has waited too long for an interview
/// result. Only the overdue side is surfaced; there is no "new" bucket
/// for interviews.
pub fn interview_result_overdue(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - updated_at >= INTERVIEW_OVERDUE_AFTER
}

/// Named task buckets of the company board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    NoJobPostings,
    NewApplication,
    OverdueApplication,
    NewMessage,
    OverdueMessage,
    UnregisteredInterviewResult,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoJobPostings => "NO_JOB_POSTINGS",
            Self::NewApplication => "NEW_APPLICATION",
            Self::OverdueApplication => "OVERDUE_APPLICATION",
            Self::NewMessage => "NEW_MESSAGE",
            Self::OverdueMessage => "OVERDUE_MESSAGE",
            Self::UnregisteredInterviewResult => "UNREGISTERED_INTERVIEW_RESULT",
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One summarized row inside a bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    pub candidate_name: String,
    pub job_title: Option<String>,
    /// The timestamp the bucket classification was computed from
    pub anchored_at: DateTime<Utc>,
}

/// A bucket: an active flag plus at most [`MAX_TASK_ENTRIES`] entries
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskBucket {
    pub active: bool,
    pub entries: Vec<TaskEntry>,
}

impl TaskBucket {
    pub fn inactive() -> Self {
        Self::default()
    }

    /// Flag-only bucket with no entries (NO_JOB_POSTINGS)
    pub fn flag(active: bool) -> Self {
        Self {
            active,
            entries: Vec::new(),
        }
    }

    /// "New" buckets list the most recent items first
    pub fn newest_first(mut entries: Vec<TaskEntry>) -> Self {
        entries.sort_by(|a, b| b.anchored_at.cmp(&a.anchored_at));
        entries.truncate(MAX_TASK_ENTRIES);
        Self {
            active: !entries.is_empty(),
            entries,
        }
    }

    /// "Overdue" buckets list the most overdue items first
    pub fn oldest_first(mut entries: Vec<TaskEntry>) -> Self {
        entries.sort_by(|a, b| a.anchored_at.cmp(&b.anchored_at));
        entries.truncate(MAX_TASK_ENTRIES);
        Self {
            active: !entries.is_empty(),
            entries,
        }
    }
}

/// The per-request company dashboard payload
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompanyTaskBoard {
    pub no_job_postings: TaskBucket,
    pub new_applications: TaskBucket,
    pub overdue_applications: TaskBucket,
    pub new_messages: TaskBucket,
    pub overdue_messages: TaskBucket,
    pub unregistered_interview_results: TaskBucket,
}

/// A candidate-authored, not-yet-processed message joined with the
/// candidate and posting it concerns. Query-layer row feeding the
/// message buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLead {
    pub room_id: Snowflake,
    pub candidate_id: Snowflake,
    pub candidate_name: String,
    pub job_title: Option<String>,
    pub anchored_at: DateTime<Utc>,
}

impl CandidateLead {
    pub fn into_entry(self) -> TaskEntry {
        TaskEntry {
            candidate_name: self.candidate_name,
            job_title: self.job_title,
            anchored_at: self.anchored_at,
        }
    }
}
