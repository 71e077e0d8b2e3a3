//! User repository for database operations.
//!
//! The password hash lives only on the private row type here; every public
//! conversion drops it.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use artfolio_core::{Email, UserId, UserRole};

use super::{RepositoryError, map_unique_violation};
use crate::models::user::{ProfileUpdate, SocialLinks, User};

const USER_COLUMNS: &str = "id, email, password_hash, role, display_name, profile_image, \
     location, bio, professional_title, website, social_links, categories, \
     created_at, last_login";

/// Private row type; the only place a password hash is materialized.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    email: String,
    password_hash: String,
    role: UserRole,
    display_name: String,
    profile_image: String,
    location: Option<String>,
    bio: Option<String>,
    professional_title: Option<String>,
    website: Option<String>,
    social_links: Option<Json<SocialLinks>>,
    categories: Vec<String>,
    created_at: DateTime<Utc>,
    last_login: DateTime<Utc>,
}

impl UserRow {
    /// Convert to the domain type, dropping the password hash.
    fn into_user(self) -> Result<User, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(User {
            id: UserId::new(self.id),
            email,
            role: self.role,
            display_name: self.display_name,
            profile_image: self.profile_image,
            location: self.location,
            bio: self.bio,
            professional_title: self.professional_title,
            website: self.website,
            social_links: self.social_links.map(|j| j.0).unwrap_or_default(),
            categories: self.categories,
            created_at: self.created_at,
            last_login: self.last_login,
        })
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        email: &Email,
        password_hash: &str,
        display_name: &str,
        role: UserRole,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (email, password_hash, role, display_name)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(email.as_str())
        .bind(password_hash)
        .bind(role)
        .bind(display_name)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "email already exists"))?;

        row.into_user()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// Get a user and their password hash by email.
    ///
    /// Returns `None` if no account exists for the address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let password_hash = row.password_hash.clone();
        Ok(Some((row.into_user()?, password_hash)))
    }

    /// Record a successful login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn touch_last_login(&self, id: UserId) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE users SET last_login = now() WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Apply a partial profile update; only supplied fields change.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn update_profile(
        &self,
        id: UserId,
        update: &ProfileUpdate,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET
                 display_name = COALESCE($2, display_name),
                 location = COALESCE($3, location),
                 bio = COALESCE($4, bio),
                 professional_title = COALESCE($5, professional_title),
                 website = COALESCE($6, website),
                 social_links = COALESCE($7, social_links),
                 categories = COALESCE($8, categories)
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(update.display_name.as_deref())
        .bind(update.location.as_deref())
        .bind(update.bio.as_deref())
        .bind(update.professional_title.as_deref())
        .bind(update.website.as_deref())
        .bind(update.social_links.as_ref().map(Json))
        .bind(update.categories.as_deref())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.into_user()
    }

    /// Replace the stored profile image filename.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn set_profile_image(
        &self,
        id: UserId,
        filename: &str,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET profile_image = $2 WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(filename)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.into_user()
    }

    /// All users with role artist, newest-first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_artists(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE role = 'artist' ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    /// Add an artist to a user's saved list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the artist is already saved.
    pub async fn save_artist(
        &self,
        user_id: UserId,
        artist_id: UserId,
    ) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO saved_artists (user_id, artist_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(artist_id)
            .execute(self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "Artist already saved"))?;
        Ok(())
    }

    /// Remove an artist from a user's saved list. Idempotent: removing an
    /// artist that isn't saved is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn unsave_artist(
        &self,
        user_id: UserId,
        artist_id: UserId,
    ) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM saved_artists WHERE user_id = $1 AND artist_id = $2")
            .bind(user_id)
            .bind(artist_id)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// The ids of a user's saved artists, oldest save first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn saved_artist_ids(&self, user_id: UserId) -> Result<Vec<UserId>, RepositoryError> {
        let ids = sqlx::query_scalar::<_, UserId>(
            "SELECT artist_id FROM saved_artists WHERE user_id = $1 ORDER BY saved_at ASC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;
        Ok(ids)
    }

    /// Resolve a user's saved artists to their full records.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn saved_artists(&self, user_id: UserId) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT u.* FROM users u
             JOIN saved_artists s ON s.artist_id = u.id
             WHERE s.user_id = $1
             ORDER BY s.saved_at ASC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }
}
