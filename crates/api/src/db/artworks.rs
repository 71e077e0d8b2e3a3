//! Artwork repository for database operations.

use sqlx::PgPool;

use artfolio_core::{ArtworkId, UserId};

use super::RepositoryError;
use crate::models::artwork::{Artwork, ArtistSummary, ArtworkUpdate, ArtworkWithArtist};

/// Optional listing filters; `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct ArtworkFilter {
    pub category: Option<String>,
    pub artist: Option<UserId>,
}

/// Row for listings: the artwork plus the joined artist summary columns.
#[derive(Debug, sqlx::FromRow)]
struct ArtworkArtistRow {
    #[sqlx(flatten)]
    artwork: Artwork,
    artist_display_name: String,
    artist_profile_image: String,
}

impl From<ArtworkArtistRow> for ArtworkWithArtist {
    fn from(row: ArtworkArtistRow) -> Self {
        let artist = ArtistSummary {
            id: row.artwork.artist_id,
            display_name: row.artist_display_name,
            profile_image: row.artist_profile_image,
        };
        Self {
            artwork: row.artwork,
            artist,
        }
    }
}

/// Fields for a new artwork record.
#[derive(Debug, Clone)]
pub struct NewArtwork {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub image: String,
    pub thumbnail: String,
    pub medium_image: String,
    pub tags: Vec<String>,
    pub artist_id: UserId,
}

/// Repository for artwork database operations.
pub struct ArtworkRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ArtworkRepository<'a> {
    /// Create a new artwork repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new artwork.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewArtwork) -> Result<Artwork, RepositoryError> {
        let artwork = sqlx::query_as::<_, Artwork>(
            "INSERT INTO artworks
                 (title, description, category, image, thumbnail, medium_image, tags, artist_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(&new.title)
        .bind(new.description.as_deref())
        .bind(&new.category)
        .bind(&new.image)
        .bind(&new.thumbnail)
        .bind(&new.medium_image)
        .bind(&new.tags)
        .bind(new.artist_id)
        .fetch_one(self.pool)
        .await?;

        Ok(artwork)
    }

    /// A page of artworks, newest-first, joined with the artist summary.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        filter: &ArtworkFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ArtworkWithArtist>, RepositoryError> {
        let rows = sqlx::query_as::<_, ArtworkArtistRow>(
            "SELECT a.*,
                    u.display_name AS artist_display_name,
                    u.profile_image AS artist_profile_image
             FROM artworks a
             JOIN users u ON u.id = a.artist_id
             WHERE ($1::text IS NULL OR a.category = $1)
               AND ($2::int4 IS NULL OR a.artist_id = $2)
             ORDER BY a.created_at DESC
             LIMIT $3 OFFSET $4",
        )
        .bind(filter.category.as_deref())
        .bind(filter.artist)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(ArtworkWithArtist::from).collect())
    }

    /// Total number of artworks matching the filter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self, filter: &ArtworkFilter) -> Result<i64, RepositoryError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM artworks
             WHERE ($1::text IS NULL OR category = $1)
               AND ($2::int4 IS NULL OR artist_id = $2)",
        )
        .bind(filter.category.as_deref())
        .bind(filter.artist)
        .fetch_one(self.pool)
        .await?;

        Ok(total)
    }

    /// Get an artwork by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: ArtworkId) -> Result<Option<Artwork>, RepositoryError> {
        let artwork = sqlx::query_as::<_, Artwork>("SELECT * FROM artworks WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(artwork)
    }

    /// Apply a partial update; only supplied fields change.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the artwork doesn't exist.
    pub async fn update(
        &self,
        id: ArtworkId,
        update: &ArtworkUpdate,
    ) -> Result<Artwork, RepositoryError> {
        let artwork = sqlx::query_as::<_, Artwork>(
            "UPDATE artworks SET
                 title = COALESCE($2, title),
                 description = COALESCE($3, description),
                 category = COALESCE($4, category),
                 tags = COALESCE($5, tags)
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(update.title.as_deref())
        .bind(update.description.as_deref())
        .bind(update.category.as_deref())
        .bind(update.tags.as_deref())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(artwork)
    }

    /// Delete an artwork.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the artwork doesn't exist.
    pub async fn delete(&self, id: ArtworkId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM artworks WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// All artworks for one artist, newest-first, no pagination.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_artist(&self, artist_id: UserId) -> Result<Vec<Artwork>, RepositoryError> {
        let artworks = sqlx::query_as::<_, Artwork>(
            "SELECT * FROM artworks WHERE artist_id = $1 ORDER BY created_at DESC",
        )
        .bind(artist_id)
        .fetch_all(self.pool)
        .await?;

        Ok(artworks)
    }
}
