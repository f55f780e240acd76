//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod context;
pub mod dispatcher;
pub mod error;
pub mod message;
pub mod room;
pub mod tasks;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use dispatcher::{DispatchJob, DispatcherHandle, NotificationDispatcher, OutboxWorker};
pub use error::{ServiceError, ServiceResult};
pub use message::MessageService;
pub use room::RoomService;
pub use tasks::TaskService;
