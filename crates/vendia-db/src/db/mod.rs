//! Database repositories for data access layer
//!
//! Each repository is responsible for a specific domain entity and provides
//! CRUD operations and specialized queries. Control-plane repositories
//! (tenants, memberships) live under control/.

pub mod control;

pub use control::{MembershipRepository, TenantRepository};
