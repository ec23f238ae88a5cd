//! Service-trait implementations over the concrete Postgres repositories.
//!
//! Kept here so vendia-db stays free of service-layer trait knowledge.

use async_trait::async_trait;
use uuid::Uuid;

use vendia_core::{identifier::ExternalStoreId, models::Tenant, AppError};
use vendia_db::{MembershipRepository, TenantRepository};

use crate::services::identity::{MembershipGate, TenantStore};

#[async_trait]
impl TenantStore for TenantRepository {
    async fn tenant_by_id(&self, id: Uuid) -> Result<Option<Tenant>, AppError> {
        self.get_tenant(id).await
    }

    async fn tenant_by_external_store_id(
        &self,
        external_id: &ExternalStoreId,
    ) -> Result<Option<Tenant>, AppError> {
        self.find_by_external_store_id(external_id).await
    }

    async fn link_external_store(
        &self,
        tenant_id: Uuid,
        external_id: &ExternalStoreId,
    ) -> Result<Tenant, AppError> {
        TenantRepository::link_external_store(self, tenant_id, external_id).await
    }

    async fn unlink_external_store(&self, tenant_id: Uuid) -> Result<(), AppError> {
        TenantRepository::unlink_external_store(self, tenant_id).await
    }
}

#[async_trait]
impl MembershipGate for MembershipRepository {
    async fn has_active_membership(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, AppError> {
        MembershipRepository::has_active_membership(self, tenant_id, user_id).await
    }
}
