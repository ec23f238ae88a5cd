use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Membership role, ordered by privilege: viewer < editor < admin < owner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "membership_role", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum MembershipRole {
    Viewer,
    Editor,
    Admin,
    Owner,
}

impl Display for MembershipRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MembershipRole::Viewer => write!(f, "viewer"),
            MembershipRole::Editor => write!(f, "editor"),
            MembershipRole::Admin => write!(f, "admin"),
            MembershipRole::Owner => write!(f, "owner"),
        }
    }
}

/// Join entity between a user identity and a tenant.
///
/// At most one row per `(tenant_id, user_id)` pair, enforced by a DB unique
/// constraint. Memberships are deactivated rather than deleted, to preserve
/// audit history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Membership {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub role: MembershipRole,
    pub is_active: bool,
    pub invited_by: Option<Uuid>,
    pub invited_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a membership (invitation or signup).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMembership {
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub role: MembershipRole,
    pub invited_by: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_privilege_ordering() {
        assert!(MembershipRole::Viewer < MembershipRole::Editor);
        assert!(MembershipRole::Editor < MembershipRole::Admin);
        assert!(MembershipRole::Admin < MembershipRole::Owner);
        assert!(MembershipRole::Owner >= MembershipRole::Admin);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(MembershipRole::Viewer.to_string(), "viewer");
        assert_eq!(MembershipRole::Owner.to_string(), "owner");
    }
}
