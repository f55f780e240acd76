//! Request extractors
//!
//! Custom Axum extractors for identity, pagination, and validated JSON.

pub mod identity;
pub mod pagination;
pub mod validated;

pub use identity::Identity;
pub use pagination::Pagination;
pub use validated::ValidatedJson;
