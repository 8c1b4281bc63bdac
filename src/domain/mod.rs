//! Domain layer for the verification engine
//!
//! Core models, errors and the port traits that external collaborators
//! implement. Nothing in here performs I/O.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult, RemoteError};
