//! Candidate entity and notification preference

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Whether the candidate wants email notifications.
/// Unset preference is treated as receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationPreference {
    #[default]
    Receive,
    NotReceive,
}

impl NotificationPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Receive => "RECEIVE",
            Self::NotReceive => "NOT_RECEIVE",
        }
    }
}

impl std::fmt::Display for NotificationPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NotificationPreference {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RECEIVE" => Ok(Self::Receive),
            "NOT_RECEIVE" => Ok(Self::NotReceive),
            other => Err(DomainError::ValidationError(format!(
                "invalid notification preference: {other}"
            ))),
        }
    }
}

/// Candidate entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: Snowflake,
    pub email: String,
    pub family_name: Option<String>,
    pub given_name: Option<String>,
    pub notification_preference: Option<NotificationPreference>,
    pub created_at: DateTime<Utc>,
}

impl Candidate {
    /// Unset preference defaults to receive
    pub fn wants_email(&self) -> bool {
        self.notification_preference.unwrap_or_default() == NotificationPreference::Receive
    }

    /// Human-readable name with graceful fallback: full name parts,
    /// then the email local part, then a generic label.
    pub fn display_name(&self) -> String {
        Self::format_display_name(
            self.family_name.as_deref(),
            self.given_name.as_deref(),
            &self.email,
        )
    }

    /// Name formatting over raw parts, for callers holding joined rows
    /// rather than a full entity
    pub fn format_display_name(
        family_name: Option<&str>,
        given_name: Option<&str>,
        email: &str,
    ) -> String {
        match (family_name, given_name) {
            (Some(family), Some(given)) => format!("{family} {given}"),
            (Some(family), None) => family.to_string(),
            (None, Some(given)) => given.to_string(),
            (None, None) => email
                .split('@')
                .next()
                .filter(|local| !local.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| "Candidate".to_string()),
        }
    }
}
