//! `SQLite` persistence (sqlx)

pub mod connection;
pub mod result_store;
pub mod telemetry_store;
pub mod utils;

pub use connection::DatabaseConnection;
pub use result_store::SqliteResultStore;
pub use telemetry_store::SqliteTelemetryStore;
