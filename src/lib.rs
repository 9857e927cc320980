/// Basic application code
pub mod app;
/// Controllers for REST endpoints
pub mod controller;
/// Domain objects
pub mod domain;
/// Error enums
pub mod error;
/// Stored record kinds
pub mod model;
/// Repositories
pub mod repo;
/// Application settings
pub mod settings;
/// Document store gateway
pub mod store;
/// Application telemetry for tracing and logging
pub mod telemetry;
