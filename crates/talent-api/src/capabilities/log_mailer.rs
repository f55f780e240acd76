//! Log-only mail transport
//!
//! Stands in for the real mail provider in development: every dispatch
//! is logged instead of sent.

use async_trait::async_trait;
use talent_core::{DomainError, MailRequest, MailTransport};
use tracing::info;

/// Mail transport that logs requests instead of sending them
#[derive(Debug, Default)]
pub struct LogMailTransport;

#[async_trait]
impl MailTransport for LogMailTransport {
    async fn send(&self, request: MailRequest) -> Result<(), DomainError> {
        info!(
            to = %request.to,
            template_id = %request.template_id,
            variables = ?request.variables,
            "mail dispatch (log transport)"
        );
        Ok(())
    }
}
