//! Company group model -> entity mapper

use talent_core::{CompanyGroup, Snowflake};

use crate::models::CompanyGroupModel;

impl From<CompanyGroupModel> for CompanyGroup {
    fn from(model: CompanyGroupModel) -> Self {
        CompanyGroup {
            id: Snowflake::new(model.id),
            name: model.name,
            created_at: model.created_at,
        }
    }
}
