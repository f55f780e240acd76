//! Caller identity extractor
//!
//! Identities are resolved by the upstream session gateway and forwarded
//! on trusted headers: `x-candidate-id` for candidates, or
//! `x-company-user-id` plus `x-company-group-ids` (comma-separated) for
//! company-side users. This service authorizes against that identity and
//! never validates credentials itself.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use talent_common::AppError;
use talent_core::{CallerIdentity, Snowflake};

use crate::response::ApiError;

/// Header carrying a candidate identity
pub const CANDIDATE_ID_HEADER: &str = "x-candidate-id";
/// Header carrying a company user identity
pub const COMPANY_USER_ID_HEADER: &str = "x-company-user-id";
/// Header carrying the company user's authorized group ids
pub const COMPANY_GROUP_IDS_HEADER: &str = "x-company-group-ids";

/// Verified caller extracted from the identity headers
#[derive(Debug, Clone)]
pub struct Identity(pub CallerIdentity);

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let candidate = header_value(parts, CANDIDATE_ID_HEADER)?;
        let company_user = header_value(parts, COMPANY_USER_ID_HEADER)?;

        let caller = match (candidate, company_user) {
            (Some(candidate_id), None) => CallerIdentity::Candidate {
                candidate_id: parse_id(CANDIDATE_ID_HEADER, candidate_id)?,
            },
            (None, Some(company_user_id)) => {
                let group_ids = header_value(parts, COMPANY_GROUP_IDS_HEADER)?
                    .ok_or_else(|| {
                        AppError::InvalidIdentity(format!(
                            "{COMPANY_GROUP_IDS_HEADER} is required for company users"
                        ))
                    })?
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| parse_id(COMPANY_GROUP_IDS_HEADER, s))
                    .collect::<Result<Vec<Snowflake>, ApiError>>()?;

                CallerIdentity::CompanyUser {
                    company_user_id: parse_id(COMPANY_USER_ID_HEADER, company_user_id)?,
                    group_ids,
                }
            }
            (Some(_), Some(_)) => {
                return Err(AppError::InvalidIdentity(
                    "conflicting identity headers".to_string(),
                )
                .into());
            }
            (None, None) => return Err(AppError::MissingIdentity.into()),
        };

        Ok(Identity(caller))
    }
}

fn header_value<'a>(parts: &'a Parts, name: &str) -> Result<Option<&'a str>, ApiError> {
    parts
        .headers
        .get(name)
        .map(|v| {
            v.to_str()
                .map_err(|_| AppError::InvalidIdentity(format!("{name} is not valid UTF-8")).into())
        })
        .transpose()
}

fn parse_id(header: &str, value: &str) -> Result<Snowflake, ApiError> {
    value
        .parse::<Snowflake>()
        .map_err(|_| AppError::InvalidIdentity(format!("invalid {header}: {value}")).into())
}
