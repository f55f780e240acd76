//! Job posting, read-only input to the task engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Publication status of a job posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Draft,
    PendingApproval,
    Published,
    Closed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::PendingApproval => "PENDING_APPROVAL",
            Self::Published => "PUBLISHED",
            Self::Closed => "CLOSED",
        }
    }

    /// Published and pending-approval postings both count as active:
    /// a posting waiting on review still represents hiring intent.
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Published | Self::PendingApproval)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JobStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "PENDING_APPROVAL" => Ok(Self::PendingApproval),
            "PUBLISHED" => Ok(Self::Published),
            "CLOSED" => Ok(Self::Closed),
            other => Err(DomainError::ValidationError(format!(
                "invalid job status: {other}"
            ))),
        }
    }
}

/// Job posting entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPosting {
    pub id: Snowflake,
    pub company_group_id: Snowflake,
    pub title: String,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobPosting {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}
