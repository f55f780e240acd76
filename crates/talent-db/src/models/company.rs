//! Company group database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for company_groups table (read-only in this subsystem)
#[derive(Debug, Clone, FromRow)]
pub struct CompanyGroupModel {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
