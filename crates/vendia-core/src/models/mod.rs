//! Data models for the application
//!
//! This module contains all data structures used throughout the application,
//! organized by domain.

mod membership;
mod tenant;

// Re-export all models for convenient imports
pub use membership::*;
pub use tenant::*;
