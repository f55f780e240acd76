//! Capability implementations
//!
//! Concrete mail transport and file storage backing the capability
//! traits from the core crate.

pub mod local_storage;
pub mod log_mailer;

pub use local_storage::LocalFileStorage;
pub use log_mailer::LogMailTransport;
