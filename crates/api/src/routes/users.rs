//! User profile and artist directory route handlers.

use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use serde::Serialize;

use artfolio_core::UserId;

use crate::db::{RepositoryError, UserRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::user::{ProfileUpdate, PublicProfile, User};
use crate::services::media::MediaKind;
use crate::state::AppState;

/// Response for a profile image upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileImageResponse {
    pub success: bool,
    pub profile_image: String,
    pub user: User,
}

/// Current user's profile.
pub async fn profile(RequireAuth(user): RequireAuth) -> Result<Json<User>> {
    Ok(Json(user))
}

/// Partial profile update; only supplied fields change.
///
/// # Errors
///
/// Returns 401 without a valid token.
pub async fn update_profile(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<User>> {
    let users = UserRepository::new(state.pool());
    let updated = users.update_profile(user.id, &update).await?;
    Ok(Json(updated))
}

/// Upload a profile image.
///
/// Accepts a multipart form with a `profileImage` file field; the stored
/// square thumbnail becomes the user's profile image.
///
/// # Errors
///
/// Returns 400 when no file is present, 415 for non-images, 413 above the
/// profile ceiling.
pub async fn upload_profile_image(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProfileImageResponse>> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("profileImage") || field.file_name().is_some() {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_owned();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            upload = Some((data.to_vec(), content_type));
            break;
        }
    }

    let (data, content_type) =
        upload.ok_or_else(|| AppError::BadRequest("No file uploaded".to_owned()))?;

    let stored = state
        .media()
        .store(data, &content_type, MediaKind::Profile)
        .await?;

    let users = UserRepository::new(state.pool());
    let updated = users.set_profile_image(user.id, &stored.thumbnail).await?;

    Ok(Json(ProfileImageResponse {
        success: true,
        profile_image: stored.thumbnail,
        user: updated,
    }))
}

/// Public profile by id; excludes password and email.
///
/// # Errors
///
/// Returns 404 when the user doesn't exist.
pub async fn public_profile(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<PublicProfile>> {
    let users = UserRepository::new(state.pool());
    let user = users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_owned()))?;

    Ok(Json(PublicProfile::from(user)))
}

/// All artists, newest-first.
pub async fn artists_all(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = UserRepository::new(state.pool());
    Ok(Json(users.list_artists().await?))
}

/// Save an artist to the caller's list.
///
/// # Errors
///
/// Returns 404 when the target isn't an artist, 409 when already saved.
pub async fn save_artist(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(artist_id): Path<UserId>,
) -> Result<Json<Vec<UserId>>> {
    let users = UserRepository::new(state.pool());
    ensure_artist(&users, artist_id).await?;

    users
        .save_artist(user.id, artist_id)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(msg) => AppError::Conflict(msg),
            other => AppError::Database(other),
        })?;

    Ok(Json(users.saved_artist_ids(user.id).await?))
}

/// Remove an artist from the caller's list.
///
/// Idempotent: removing an artist that isn't saved returns the unchanged
/// list.
///
/// # Errors
///
/// Returns 404 when the target isn't an artist.
pub async fn unsave_artist(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(artist_id): Path<UserId>,
) -> Result<Json<Vec<UserId>>> {
    let users = UserRepository::new(state.pool());
    ensure_artist(&users, artist_id).await?;

    users.unsave_artist(user.id, artist_id).await?;

    Ok(Json(users.saved_artist_ids(user.id).await?))
}

/// Resolve the caller's saved artists to public profiles.
pub async fn saved_artists(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicProfile>>> {
    let users = UserRepository::new(state.pool());
    let artists = users.saved_artists(user.id).await?;

    Ok(Json(artists.into_iter().map(PublicProfile::from).collect()))
}

/// Check that `artist_id` resolves to a user with role artist.
async fn ensure_artist(users: &UserRepository<'_>, artist_id: UserId) -> Result<()> {
    let target = users.find_by_id(artist_id).await?;
    match target {
        Some(user) if user.role.is_artist() => Ok(()),
        _ => Err(AppError::NotFound("Artist not found".to_owned())),
    }
}
