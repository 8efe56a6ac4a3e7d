//! User roles and visibility.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The role assigned to a user record.
///
/// Roles drive every visibility rule in the system: admins see all books,
/// all categories, the user management views, and the dashboard aggregates;
/// plain users see only books within their own associated categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full access, including user/category administration and aggregates.
    Admin,
    /// Category-narrowed book access only.
    #[default]
    User,
}

impl Role {
    /// Whether this role carries administrative privileges.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "ADMIN"),
            Self::User => write!(f, "USER"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"USER\"");
        let role: Role = serde_json::from_str("\"USER\"").unwrap();
        assert_eq!(role, Role::User);
    }

    #[test]
    fn default_is_user() {
        assert_eq!(Role::default(), Role::User);
        assert!(!Role::default().is_admin());
    }
}
