//! User role type.

use serde::{Deserialize, Serialize};

/// The account type a user registers as.
///
/// Artists publish artworks and receive enquiries; clients browse the
/// directory and send enquiries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "user_role", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Publishes artworks, owns a public profile, receives enquiries.
    Artist,
    /// Browses the directory, saves artists, sends enquiries.
    Client,
}

impl UserRole {
    /// Whether this role may publish artworks and receive enquiries.
    #[must_use]
    pub const fn is_artist(self) -> bool {
        matches!(self, Self::Artist)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Artist => write!(f, "artist"),
            Self::Client => write!(f, "client"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "artist" => Ok(Self::Artist),
            "client" => Ok(Self::Client),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&UserRole::Artist).expect("serialize"),
            "\"artist\""
        );
        let role: UserRole = serde_json::from_str("\"client\"").expect("deserialize");
        assert_eq!(role, UserRole::Client);
    }

    #[test]
    fn test_role_rejects_unknown() {
        assert!(serde_json::from_str::<UserRole>("\"admin\"").is_err());
    }

    #[test]
    fn test_role_display_from_str_roundtrip() {
        for role in [UserRole::Artist, UserRole::Client] {
            assert_eq!(UserRole::from_str(&role.to_string()), Ok(role));
        }
    }

    #[test]
    fn test_is_artist() {
        assert!(UserRole::Artist.is_artist());
        assert!(!UserRole::Client.is_artist());
    }
}
