use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Tenant lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "tenant_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum TenantStatus {
    Pending,
    Active,
    Suspended,
    Archived,
}

/// Subscription status, tracked independently of the lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "subscription_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Trial,
    Active,
    PastDue,
    Canceled,
    Unpaid,
}

/// Tenant (store) entity.
///
/// `id` is the canonical identifier: globally unique, immutable, never
/// reused. The external-platform link lives in the dedicated
/// `external_store_id` column rather than inside `metadata`, so the optional
/// mapping is visible in the type; `metadata` is reserved for unstructured
/// extension data. Tenants are soft-deleted (status transition plus
/// `deleted_at`), never physically removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    /// Routing subdomain, unique across the platform.
    pub subdomain: String,
    pub status: TenantStatus,
    pub subscription_status: SubscriptionStatus,
    /// At most one external store per tenant at any time.
    pub external_store_id: Option<String>,
    pub store_linked_at: Option<DateTime<Utc>>,
    pub store_unlinked_at: Option<DateTime<Utc>>,
    /// Arbitrary key-value metadata.
    pub metadata: JsonValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Fields required to provision a new tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTenant {
    pub name: String,
    pub subdomain: String,
    pub metadata: Option<JsonValue>,
}
