//! Value objects shared across the domain

mod attachment;
mod identity;
mod snowflake;

pub use attachment::{AttachmentPolicy, MAX_ATTACHMENT_BYTES};
pub use identity::CallerIdentity;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
