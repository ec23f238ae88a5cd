use vendia_core::{
    models::{CreateMembership, Membership, MembershipRole},
    AppError,
};

use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const MEMBERSHIP_COLUMNS: &str = "id, tenant_id, user_id, role, is_active, \
     invited_by, invited_at, created_at, updated_at";

/// Repository for managing tenant memberships.
#[derive(Clone)]
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a membership (invitation or signup).
    ///
    /// The `(tenant_id, user_id)` unique constraint rejects a second row for
    /// the same pair.
    #[tracing::instrument(skip(self), fields(db.table = "memberships", db.operation = "insert"))]
    pub async fn create_membership(
        &self,
        input: CreateMembership,
    ) -> Result<Membership, AppError> {
        let result = sqlx::query_as::<Postgres, Membership>(&format!(
            r#"
            INSERT INTO memberships (tenant_id, user_id, role, invited_by, invited_at)
            VALUES ($1, $2, $3, $4, CASE WHEN $4::uuid IS NULL THEN NULL ELSE NOW() END)
            RETURNING {MEMBERSHIP_COLUMNS}
            "#,
        ))
        .bind(input.tenant_id)
        .bind(input.user_id)
        .bind(input.role)
        .bind(input.invited_by)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(membership) => Ok(membership),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::Conflict(format!(
                    "User {} already has a membership for tenant {}",
                    input.user_id, input.tenant_id
                )))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Get the membership row for a (tenant, user) pair.
    #[tracing::instrument(skip(self), fields(db.table = "memberships", db.operation = "select"))]
    pub async fn get_membership(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Membership>, AppError> {
        let membership = sqlx::query_as::<Postgres, Membership>(&format!(
            "SELECT {MEMBERSHIP_COLUMNS} FROM memberships WHERE tenant_id = $1 AND user_id = $2"
        ))
        .bind(tenant_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(membership)
    }

    /// Change a member's role.
    #[tracing::instrument(skip(self), fields(db.table = "memberships", db.operation = "update"))]
    pub async fn set_role(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        role: MembershipRole,
    ) -> Result<Membership, AppError> {
        let membership = sqlx::query_as::<Postgres, Membership>(&format!(
            r#"
            UPDATE memberships
            SET role = $3, updated_at = NOW()
            WHERE tenant_id = $1 AND user_id = $2
            RETURNING {MEMBERSHIP_COLUMNS}
            "#,
        ))
        .bind(tenant_id)
        .bind(user_id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?;

        membership.ok_or_else(|| {
            AppError::NotFound(format!(
                "No membership for user {} in tenant {}",
                user_id, tenant_id
            ))
        })
    }

    /// Deactivate a membership (flips the active flag, preserves the row).
    #[tracing::instrument(skip(self), fields(db.table = "memberships", db.operation = "update"))]
    pub async fn deactivate(&self, tenant_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE memberships
            SET is_active = FALSE, updated_at = NOW()
            WHERE tenant_id = $1 AND user_id = $2 AND is_active
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows_affected > 0)
    }

    /// Answer "is user X an active member of tenant Y".
    #[tracing::instrument(skip(self), fields(db.table = "memberships", db.operation = "select"))]
    pub async fn has_active_membership(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, AppError> {
        let has_membership = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM memberships WHERE tenant_id = $1 AND user_id = $2 AND is_active)",
        )
        .bind(tenant_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(has_membership)
    }
}
