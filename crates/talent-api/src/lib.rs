//! # talent-api
//!
//! REST API server built with Axum framework.

pub mod capabilities;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::run;
