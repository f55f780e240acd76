//! Company group, the company side of every room

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Company group entity, used as the mail counterpart name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyGroup {
    pub id: Snowflake,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
