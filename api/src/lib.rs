//! HTTP boundary for Gatekeeper
//!
//! Exposes the login / refresh / logout / whoami endpoints and the guard
//! middleware that protects them.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;
