use vendia_core::{
    identifier::ExternalStoreId,
    models::{CreateTenant, Tenant},
    AppError,
};

use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const TENANT_COLUMNS: &str = "id, name, subdomain, status, subscription_status, \
     external_store_id, store_linked_at, store_unlinked_at, metadata, \
     created_at, updated_at, deleted_at";

/// Repository for managing tenants and their external store link.
#[derive(Clone)]
pub struct TenantRepository {
    pool: PgPool,
}

impl TenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Provision a new tenant.
    ///
    /// New tenants start as pending/trial with no external store link.
    #[tracing::instrument(skip(self), fields(db.table = "tenants", db.operation = "insert"))]
    pub async fn create_tenant(&self, input: CreateTenant) -> Result<Tenant, AppError> {
        let metadata = input
            .metadata
            .unwrap_or(serde_json::Value::Object(Default::default()));

        let result = sqlx::query_as::<Postgres, Tenant>(&format!(
            r#"
            INSERT INTO tenants (name, subdomain, status, subscription_status, metadata)
            VALUES ($1, $2, 'pending', 'trial', $3)
            RETURNING {TENANT_COLUMNS}
            "#,
        ))
        .bind(&input.name)
        .bind(&input.subdomain)
        .bind(&metadata)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(tenant) => Ok(tenant),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                AppError::Conflict(format!("Subdomain '{}' is already taken", input.subdomain)),
            ),
            Err(err) => Err(err.into()),
        }
    }

    /// Get a tenant by canonical id.
    #[tracing::instrument(skip(self), fields(db.table = "tenants", db.operation = "select", db.record_id = %id))]
    pub async fn get_tenant(&self, id: Uuid) -> Result<Option<Tenant>, AppError> {
        let tenant = sqlx::query_as::<Postgres, Tenant>(&format!(
            "SELECT {TENANT_COLUMNS} FROM tenants WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tenant)
    }

    /// Find the tenant owning an external store id.
    ///
    /// Equality query on the dedicated column; the partial unique index
    /// guarantees at most one match.
    #[tracing::instrument(skip(self), fields(db.table = "tenants", db.operation = "select"))]
    pub async fn find_by_external_store_id(
        &self,
        external_id: &ExternalStoreId,
    ) -> Result<Option<Tenant>, AppError> {
        let tenant = sqlx::query_as::<Postgres, Tenant>(&format!(
            "SELECT {TENANT_COLUMNS} FROM tenants WHERE external_store_id = $1"
        ))
        .bind(external_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(tenant)
    }

    /// Link a tenant to an external store.
    ///
    /// The partial unique index on `external_store_id` rejects a second
    /// tenant claiming the same external id, including under concurrent
    /// writers; the violation surfaces as `Conflict`.
    #[tracing::instrument(skip(self), fields(db.table = "tenants", db.operation = "update", db.record_id = %tenant_id))]
    pub async fn link_external_store(
        &self,
        tenant_id: Uuid,
        external_id: &ExternalStoreId,
    ) -> Result<Tenant, AppError> {
        let result = sqlx::query_as::<Postgres, Tenant>(&format!(
            r#"
            UPDATE tenants
            SET external_store_id = $2,
                store_linked_at = NOW(),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {TENANT_COLUMNS}
            "#,
        ))
        .bind(tenant_id)
        .bind(external_id.as_str())
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(Some(tenant)) => Ok(tenant),
            Ok(None) => Err(AppError::NotFound(format!("Tenant {} not found", tenant_id))),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::Conflict(format!(
                    "External store id {} is already linked to another tenant",
                    external_id
                )))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Unlink a tenant from its external store.
    ///
    /// Idempotent: unlinking a tenant with no link is a no-op success. Only
    /// an unknown tenant id is an error.
    #[tracing::instrument(skip(self), fields(db.table = "tenants", db.operation = "update", db.record_id = %tenant_id))]
    pub async fn unlink_external_store(&self, tenant_id: Uuid) -> Result<(), AppError> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE tenants
            SET external_store_id = NULL,
                store_unlinked_at = NOW(),
                updated_at = NOW()
            WHERE id = $1 AND external_store_id IS NOT NULL
            "#,
        )
        .bind(tenant_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows_affected > 0 {
            return Ok(());
        }

        // Nothing was linked; distinguish "no-op" from "no such tenant".
        let tenant_exists =
            sqlx::query_scalar::<Postgres, bool>("SELECT EXISTS(SELECT 1 FROM tenants WHERE id = $1)")
                .bind(tenant_id)
                .fetch_one(&self.pool)
                .await?;

        if tenant_exists {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Tenant {} not found", tenant_id)))
        }
    }

    /// Soft-delete a tenant: archive it and stamp `deleted_at`.
    #[tracing::instrument(skip(self), fields(db.table = "tenants", db.operation = "update", db.record_id = %id))]
    pub async fn soft_delete_tenant(&self, id: Uuid) -> Result<bool, AppError> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE tenants
            SET status = 'archived',
                deleted_at = NOW(),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows_affected > 0)
    }
}
