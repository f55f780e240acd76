//! Job application, consumed read-only by the task engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Processing status of an application, owned by an upstream system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Sent,
    Read,
    Responded,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "SENT",
            Self::Read => "READ",
            Self::Responded => "RESPONDED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Statuses that still need a company-side response
    #[inline]
    pub fn is_awaiting_response(&self) -> bool {
        matches!(self, Self::Sent | Self::Read)
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SENT" => Ok(Self::Sent),
            "READ" => Ok(Self::Read),
            "RESPONDED" => Ok(Self::Responded),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(DomainError::ValidationError(format!(
                "invalid application status: {other}"
            ))),
        }
    }
}

/// Application entity
///
/// Written by the application flow upstream; this crate only reads it to
/// derive company-side tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub id: Snowflake,
    pub candidate_id: Snowflake,
    pub job_posting_id: Snowflake,
    pub company_group_id: Snowflake,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
