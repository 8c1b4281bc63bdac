//! Infrastructure layer module
//!
//! Adapters and external integrations:
//! - Database implementations (SQLite with sqlx)
//! - HTTP clients for the inference and compliance services
//! - Configuration management
//! - Logging infrastructure
//! - In-memory stores
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod database;
pub mod http;
pub mod logging;
pub mod memory;
