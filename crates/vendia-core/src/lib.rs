//! Vendia Core Library
//!
//! This crate provides the core domain models, error types, configuration, and
//! store identifier handling that are shared across all Vendia components.

pub mod config;
pub mod error;
pub mod identifier;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use identifier::{ExternalStoreId, StoreIdentifier};
