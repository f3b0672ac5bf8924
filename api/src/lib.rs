//! HTTP surface of the one-time password service
//!
//! Library exports for the binary and for route tests.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AppState};
