//! Vendia services
//!
//! Business services built on top of vendia-core and vendia-db. The store
//! identity service resolves caller-supplied store identifiers (canonical
//! tenant UUID or external platform id) to their canonical form and enforces
//! membership-based authorization before any tenant-scoped operation runs.

pub mod db_impl;
pub mod services;

pub use services::identity::{
    MembershipGate, NormalizedStore, StoreIdentityService, TenantStore, TranslateError,
};
