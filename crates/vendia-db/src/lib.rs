//! Vendia database layer
//!
//! Postgres repositories for the control-plane entities (tenants,
//! memberships) plus pool setup and migrations.

pub mod db;
pub mod setup;

pub use db::{MembershipRepository, TenantRepository};
pub use setup::setup_database;
