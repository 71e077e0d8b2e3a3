//! Artwork catalog route handlers.

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use artfolio_core::{ArtworkId, UserId};

use crate::db::artworks::{ArtworkFilter, ArtworkRepository, NewArtwork};
use crate::db::users::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::artwork::{Artwork, ArtworkDetail, ArtworkUpdate, ArtworkWithArtist};
use crate::models::user::PublicProfile;
use crate::services::media::MediaKind;
use crate::state::AppState;

/// Default page size for listings.
const DEFAULT_PAGE_SIZE: i64 = 20;
/// Ceiling a caller can raise the page size to.
const MAX_PAGE_SIZE: i64 = 100;

/// Query parameters for the artwork listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub artist: Option<UserId>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// One page of artworks plus pagination metadata.
#[derive(Debug, Serialize)]
pub struct ArtworkPage {
    pub artworks: Vec<ArtworkWithArtist>,
    pub total: i64,
    pub page: i64,
    pub pages: i64,
    pub limit: i64,
}

/// Paginated artwork listing, newest-first, with optional category and
/// artist filters.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ArtworkPage>> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

    let filter = ArtworkFilter {
        category: query.category.filter(|c| !c.is_empty()),
        artist: query.artist,
    };

    let repo = ArtworkRepository::new(state.pool());
    let total = repo.count(&filter).await?;
    let artworks = repo.list(&filter, limit, page_offset(page, limit)).await?;

    Ok(Json(ArtworkPage {
        artworks,
        total,
        page,
        pages: page_count(total, limit),
        limit,
    }))
}

/// Publish a new artwork from a multipart form.
///
/// Expects `title`, `category`, optional `description`, repeatable `tags`
/// fields, and an `image` file.
///
/// # Errors
///
/// Returns 403 for non-artists, 400 when title/category/image are missing,
/// 415/413 for upload violations.
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Artwork>)> {
    if !user.role.is_artist() {
        return Err(AppError::Forbidden(
            "Only artists can publish artworks".to_owned(),
        ));
    }

    let mut title = None;
    let mut description = None;
    let mut category = None;
    let mut tags = Vec::new();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        match field.name() {
            Some("title") => title = Some(read_text(field).await?),
            Some("description") => description = Some(read_text(field).await?),
            Some("category") => category = Some(read_text(field).await?),
            Some("tags") => tags.push(read_text(field).await?),
            Some("image") => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                image = Some((data.to_vec(), content_type));
            }
            _ => {}
        }
    }

    let title = title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Title and category required".to_owned()))?;
    let category = category
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Title and category required".to_owned()))?;
    let (data, content_type) =
        image.ok_or_else(|| AppError::BadRequest("Artwork image required".to_owned()))?;

    let stored = state
        .media()
        .store(data, &content_type, MediaKind::Artwork)
        .await?;

    let new = NewArtwork {
        title,
        description: description.filter(|d| !d.is_empty()),
        category,
        medium_image: stored
            .medium
            .unwrap_or_else(|| stored.original.clone()),
        image: stored.original,
        thumbnail: stored.thumbnail,
        tags,
        artist_id: user.id,
    };

    let artwork = ArtworkRepository::new(state.pool()).create(&new).await?;
    tracing::info!(artwork_id = %artwork.id, artist_id = %user.id, "artwork published");

    Ok((StatusCode::CREATED, Json(artwork)))
}

/// Artwork detail joined with the full public artist profile.
///
/// # Errors
///
/// Returns 404 when the artwork doesn't exist.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ArtworkId>,
) -> Result<Json<ArtworkDetail>> {
    let artwork = ArtworkRepository::new(state.pool())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Artwork not found".to_owned()))?;

    // The artist reference is a foreign key; a dangling one is corruption.
    let artist = UserRepository::new(state.pool())
        .find_by_id(artwork.artist_id)
        .await?
        .ok_or_else(|| AppError::Internal("artwork artist missing".to_owned()))?;

    Ok(Json(ArtworkDetail {
        artwork,
        artist: PublicProfile::from(artist),
    }))
}

/// Partial update of an artwork; owner only.
///
/// # Errors
///
/// Returns 404 when absent, 403 when the caller doesn't own it.
pub async fn update(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<ArtworkId>,
    Json(patch): Json<ArtworkUpdate>,
) -> Result<Json<Artwork>> {
    let repo = ArtworkRepository::new(state.pool());
    let artwork = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Artwork not found".to_owned()))?;

    ensure_owner(artwork.artist_id, user.id, "Not authorized to update this artwork")?;

    Ok(Json(repo.update(id, &patch).await?))
}

/// Delete an artwork; owner only.
///
/// # Errors
///
/// Returns 404 when absent, 403 when the caller doesn't own it.
pub async fn delete(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<ArtworkId>,
) -> Result<StatusCode> {
    let repo = ArtworkRepository::new(state.pool());
    let artwork = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Artwork not found".to_owned()))?;

    ensure_owner(artwork.artist_id, user.id, "Not authorized to delete this artwork")?;

    repo.delete(id).await?;
    tracing::info!(artwork_id = %id, artist_id = %user.id, "artwork deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// All artworks for one artist, newest-first, no pagination.
pub async fn by_artist(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<Artwork>>> {
    let artworks = ArtworkRepository::new(state.pool())
        .list_by_artist(user_id)
        .await?;
    Ok(Json(artworks))
}

/// Read a text field out of a multipart form.
async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Compare a record's stored owner against the caller's identity.
fn ensure_owner(owner: UserId, caller: UserId, message: &str) -> Result<()> {
    if owner == caller {
        Ok(())
    } else {
        Err(AppError::Forbidden(message.to_owned()))
    }
}

/// Offset of the first record on `page` (1-based).
const fn page_offset(page: i64, limit: i64) -> i64 {
    (page - 1) * limit
}

/// Number of pages needed for `total` records.
const fn page_count(total: i64, limit: i64) -> i64 {
    let quotient = total / limit;
    let remainder = total % limit;
    if (remainder > 0 && limit > 0) || (remainder < 0 && limit < 0) {
        quotient + 1
    } else {
        quotient
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_page_math() {
        // limit=2, page=2 over 5 records returns records 3-4.
        assert_eq!(page_offset(2, 2), 2);
        assert_eq!(page_count(5, 2), 3);

        assert_eq!(page_offset(1, 20), 0);
        assert_eq!(page_count(0, 20), 0);
        assert_eq!(page_count(20, 20), 1);
        assert_eq!(page_count(21, 20), 2);
    }

    #[test]
    fn test_ensure_owner_accepts_owner() {
        assert!(ensure_owner(UserId::new(7), UserId::new(7), "nope").is_ok());
    }

    #[test]
    fn test_ensure_owner_rejects_non_owner() {
        let err = ensure_owner(UserId::new(7), UserId::new(8), "Not authorized").unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
