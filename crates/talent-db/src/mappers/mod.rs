//! Model to entity mappers
//!
//! Conversions between database models and domain entities (talent-core).
//! - `TryFrom<Model> for Entity`: convert rows to domain objects; parsing
//!   the stored enum strings is fallible, so a corrupted row surfaces as a
//!   `DomainError` instead of a panic
//! - `*Insert` structs: prepare entity data for database operations

mod application;
mod candidate;
mod company;
mod job_posting;
mod lead;
mod message;
mod notification;
mod room;

pub use message::MessageInsert;
pub use notification::NotificationInsert;
pub use room::RoomInsert;
