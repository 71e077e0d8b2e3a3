//! User domain types.
//!
//! The password hash never appears on any of these types; it only exists on
//! the repository's row type and is dropped during conversion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use artfolio_core::{Email, UserId, UserRole};

/// Links to a user's social media profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

/// A full user record as seen by its owner (and by `validate`).
///
/// Includes the private email but never the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub role: UserRole,
    pub display_name: String,
    pub profile_image: String,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub professional_title: Option<String>,
    pub website: Option<String>,
    pub social_links: SocialLinks,
    pub categories: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
}

/// The public projection of a profile: excludes password and email.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub id: UserId,
    pub role: UserRole,
    pub display_name: String,
    pub profile_image: String,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub professional_title: Option<String>,
    pub website: Option<String>,
    pub social_links: SocialLinks,
    pub categories: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            display_name: user.display_name,
            profile_image: user.profile_image,
            location: user.location,
            bio: user.bio,
            professional_title: user.professional_title,
            website: user.website,
            social_links: user.social_links,
            categories: user.categories,
            created_at: user.created_at,
        }
    }
}

/// A partial profile update; only supplied fields change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub professional_title: Option<String>,
    pub website: Option<String>,
    pub social_links: Option<SocialLinks>,
    pub categories: Option<Vec<String>>,
}

/// The short user summary returned alongside a session token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub email: Email,
    pub display_name: String,
    pub role: UserRole,
    pub profile_image: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            role: user.role,
            profile_image: user.profile_image.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: UserId::new(1),
            email: Email::parse("artist@example.com").expect("valid email"),
            role: UserRole::Artist,
            display_name: "Mina".to_owned(),
            profile_image: "default-profile.jpg".to_owned(),
            location: Some("Berlin".to_owned()),
            bio: None,
            professional_title: None,
            website: None,
            social_links: SocialLinks::default(),
            categories: vec!["painting".to_owned()],
            created_at: Utc::now(),
            last_login: Utc::now(),
        }
    }

    #[test]
    fn test_public_profile_excludes_email() {
        let profile = PublicProfile::from(sample_user());
        let json = serde_json::to_value(&profile).expect("serialize");
        assert!(json.get("email").is_none());
        assert_eq!(json["displayName"], "Mina");
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let json = serde_json::to_value(sample_user()).expect("serialize");
        assert_eq!(json["profileImage"], "default-profile.jpg");
        assert_eq!(json["role"], "artist");
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
    }
}
