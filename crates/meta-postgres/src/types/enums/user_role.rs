//! User role enumeration for platform-wide authorization.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Closed set of roles a user can hold.
///
/// Corresponds to the `USER_ROLE` PostgreSQL enum. Adding a role here is a
/// schema change and must be accompanied by a migration.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::UserRole"]
pub enum UserRole {
    /// Student account with access to the catalog and self-service.
    #[db_rename = "user"]
    #[serde(rename = "user")]
    #[strum(serialize = "user")]
    #[default]
    User,

    /// Full administrative access, including user and course management.
    #[db_rename = "admin"]
    #[serde(rename = "admin")]
    #[strum(serialize = "admin")]
    Admin,

    /// Read-only access to the back office and its reports.
    #[db_rename = "analyst"]
    #[serde(rename = "analyst")]
    #[strum(serialize = "analyst")]
    Analyst,
}

impl UserRole {
    /// Returns whether this role may reach the administrative surface at all.
    #[inline]
    pub const fn is_staff(self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Analyst)
    }

    /// Returns whether this role may mutate users and courses.
    #[inline]
    pub const fn is_admin(self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn roles_round_trip_through_their_names() {
        for role in UserRole::iter() {
            let parsed: UserRole = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn unknown_role_names_are_rejected() {
        assert!("superuser".parse::<UserRole>().is_err());
        assert!("Admin".parse::<UserRole>().is_err());
        assert!(serde_json::from_str::<UserRole>("\"root\"").is_err());
    }

    #[test]
    fn staff_roles() {
        assert!(UserRole::Admin.is_staff());
        assert!(UserRole::Analyst.is_staff());
        assert!(!UserRole::User.is_staff());
        assert!(!UserRole::Analyst.is_admin());
        assert_eq!(UserRole::default(), UserRole::User);
    }
}
