//! HTTP surface of OtpGuard
//!
//! Thin actix-web layer over `og_core::services::otp::OtpService`: request
//! DTOs, route handlers, error mapping and the health check.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod telemetry;

pub use app::{configure, AppState};
