//! # talent-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use dto::{
    AttachmentPayload, MarkReadResponse, MessageResponse, RoomSummaryResponse,
    SendMessageRequest, StartConversationRequest, TaskBoardResponse, TaskBucketResponse,
    TaskEntryResponse, UnreadCountResponse, UnreadNotificationResponse, UnreadSummaryResponse,
};
pub use services::{
    DispatchJob, DispatcherHandle, MessageService, NotificationDispatcher, OutboxWorker,
    RoomService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, TaskService,
};
