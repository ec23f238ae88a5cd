//! Store identity normalization and authorization.
//!
//! The single entry point for middleware is
//! [`StoreIdentityService::normalize_and_authorize`]: it accepts whatever
//! identifier format a client supplied, resolves both representations, and
//! verifies the requesting user is an active member of the resolved tenant
//! before any tenant-scoped operation proceeds.
//!
//! Format classification always happens before any database access, and
//! authorization always happens last, so a malformed identifier never reaches
//! the membership check and an unauthorized user never learns whether an
//! external mapping exists. The whole pipeline is a read; it is safe to call
//! repeatedly or concurrently.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use vendia_core::{
    identifier::{ExternalStoreId, StoreIdentifier},
    models::Tenant,
    AppError,
};

/// Read/write access to tenant rows, as far as identity resolution needs it.
#[async_trait]
pub trait TenantStore: Send + Sync {
    /// Point lookup by canonical id.
    async fn tenant_by_id(&self, id: Uuid) -> Result<Option<Tenant>, AppError>;

    /// Equality lookup on the external store id column.
    async fn tenant_by_external_store_id(
        &self,
        external_id: &ExternalStoreId,
    ) -> Result<Option<Tenant>, AppError>;

    /// Set the external link; the storage layer enforces that no two tenants
    /// share one external id.
    async fn link_external_store(
        &self,
        tenant_id: Uuid,
        external_id: &ExternalStoreId,
    ) -> Result<Tenant, AppError>;

    /// Clear the external link. Idempotent for an already-unlinked tenant.
    async fn unlink_external_store(&self, tenant_id: Uuid) -> Result<(), AppError>;
}

/// The authorization collaborator: "is user X an active member of tenant Y".
#[async_trait]
pub trait MembershipGate: Send + Sync {
    async fn has_active_membership(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, AppError>;
}

/// Fine-grained translator errors.
///
/// `TenantNotFound` and `NoExternalMapping` are deliberately distinct:
/// callers need "you gave me a bad id" separated from "this tenant simply
/// isn't linked yet", which is an expected steady state. Infrastructure
/// failures stay in `Store` and are never reinterpreted as a missing mapping.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("tenant {0} not found")]
    TenantNotFound(Uuid),

    #[error("tenant {0} has no linked external store")]
    NoExternalMapping(Uuid),

    #[error("no tenant is linked to external store id {0}")]
    UnknownExternalId(ExternalStoreId),

    #[error(transparent)]
    Store(AppError),
}

impl From<TranslateError> for AppError {
    fn from(err: TranslateError) -> Self {
        match err {
            TranslateError::TenantNotFound(id) => {
                AppError::NotFound(format!("Tenant {} not found", id))
            }
            TranslateError::NoExternalMapping(id) => {
                AppError::NotFound(format!("Tenant {} has no linked external store", id))
            }
            TranslateError::UnknownExternalId(ext) => {
                AppError::NotFound(format!("No store found for {}", ext))
            }
            TranslateError::Store(inner) => inner,
        }
    }
}

/// Result of identifier normalization: the canonical id plus the external id
/// when the tenant is linked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedStore {
    pub canonical_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalStoreId>,
}

/// Resolves store identifiers and gates tenant access on membership.
#[derive(Clone)]
pub struct StoreIdentityService {
    tenants: Arc<dyn TenantStore>,
    memberships: Arc<dyn MembershipGate>,
}

impl StoreIdentityService {
    pub fn new(tenants: Arc<dyn TenantStore>, memberships: Arc<dyn MembershipGate>) -> Self {
        Self {
            tenants,
            memberships,
        }
    }

    /// Forward translation: canonical id to the linked external store id.
    ///
    /// A failure here is definitional, not transient; the lookup targets a
    /// strongly consistent store and is never retried.
    #[tracing::instrument(skip(self))]
    pub async fn to_external(&self, canonical_id: Uuid) -> Result<ExternalStoreId, TranslateError> {
        let tenant = self
            .tenants
            .tenant_by_id(canonical_id)
            .await
            .map_err(TranslateError::Store)?
            .ok_or(TranslateError::TenantNotFound(canonical_id))?;

        match tenant.external_store_id {
            Some(raw) => ExternalStoreId::parse(&raw).map_err(TranslateError::Store),
            None => Err(TranslateError::NoExternalMapping(canonical_id)),
        }
    }

    /// Reverse translation: external store id to the owning tenant's
    /// canonical id.
    ///
    /// At most one tenant can match; duplicates are made unrepresentable by
    /// the storage-layer uniqueness constraint, not resolved here.
    #[tracing::instrument(skip(self))]
    pub async fn to_canonical(
        &self,
        external_id: &ExternalStoreId,
    ) -> Result<Uuid, TranslateError> {
        let tenant = self
            .tenants
            .tenant_by_external_store_id(external_id)
            .await
            .map_err(TranslateError::Store)?
            .ok_or_else(|| TranslateError::UnknownExternalId(external_id.clone()))?;

        Ok(tenant.id)
    }

    /// Resolve a caller-supplied identifier to both representations and
    /// verify the requesting user is an active member of the tenant.
    ///
    /// For a canonical input the external id is resolved best-effort: a
    /// missing mapping (or missing tenant) leaves the field absent, since the
    /// external platform is optional and must never block canonical-scoped
    /// callers. Database failures during that lookup still propagate; "the
    /// store is down" and "this tenant has no link" are different answers.
    /// For an external input, failing to resolve an owner is fatal.
    ///
    /// Unauthorized callers get a uniform `Forbidden` whether the tenant is
    /// missing or they merely aren't a member, so probing cannot reveal
    /// tenant existence.
    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    pub async fn normalize_and_authorize(
        &self,
        raw_id: &str,
        user_id: Uuid,
    ) -> Result<NormalizedStore, AppError> {
        let (canonical_id, external_id) = match StoreIdentifier::parse(raw_id)? {
            StoreIdentifier::Canonical(id) => {
                let external = match self.to_external(id).await {
                    Ok(ext) => Some(ext),
                    Err(TranslateError::NoExternalMapping(_))
                    | Err(TranslateError::TenantNotFound(_)) => None,
                    Err(TranslateError::UnknownExternalId(_)) => None,
                    Err(TranslateError::Store(err)) => return Err(err),
                };
                (id, external)
            }
            StoreIdentifier::External(ext) => {
                let id = self.to_canonical(&ext).await.map_err(AppError::from)?;
                (id, Some(ext))
            }
        };

        let authorized = self
            .memberships
            .has_active_membership(canonical_id, user_id)
            .await?;
        if !authorized {
            // Uniform response; never distinguish "no such tenant" here.
            return Err(AppError::Forbidden("Access denied".to_string()));
        }

        Ok(NormalizedStore {
            canonical_id,
            external_id,
        })
    }

    /// Establish the canonical-to-external association.
    ///
    /// Both inputs are validated against their grammars before any write;
    /// either failing aborts with no write performed.
    #[tracing::instrument(skip(self))]
    pub async fn link_external_store(
        &self,
        canonical_id: &str,
        external_id: &str,
    ) -> Result<Tenant, AppError> {
        let tenant_id = parse_canonical(canonical_id)?;
        let external = ExternalStoreId::parse(external_id)?;

        self.tenants.link_external_store(tenant_id, &external).await
    }

    /// Remove the canonical-to-external association.
    ///
    /// Idempotent: removing a mapping that does not exist succeeds.
    #[tracing::instrument(skip(self))]
    pub async fn unlink_external_store(&self, canonical_id: &str) -> Result<(), AppError> {
        let tenant_id = parse_canonical(canonical_id)?;

        self.tenants.unlink_external_store(tenant_id).await
    }
}

/// Require the canonical grammar specifically; an external-format id here is
/// a caller mistake, not something to translate implicitly.
fn parse_canonical(raw: &str) -> Result<Uuid, AppError> {
    match StoreIdentifier::parse(raw) {
        Ok(StoreIdentifier::Canonical(id)) => Ok(id),
        Ok(StoreIdentifier::External(_)) | Err(_) => Err(AppError::InvalidInput(format!(
            "'{}' is not a canonical tenant id (expected a UUID)",
            raw
        ))),
    }
}
