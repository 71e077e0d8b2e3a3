//! Enquiry repository for database operations.

use sqlx::PgPool;

use artfolio_core::{EnquiryId, EnquiryStatus, UserId};

use super::RepositoryError;
use crate::models::enquiry::Enquiry;

/// Fields for a new enquiry. Status is not a field: creation always yields
/// `pending`.
#[derive(Debug, Clone)]
pub struct NewEnquiry {
    pub artist_id: UserId,
    pub client_id: Option<UserId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
}

/// Repository for enquiry database operations.
pub struct EnquiryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EnquiryRepository<'a> {
    /// Create a new enquiry repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new enquiry in the `pending` state.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewEnquiry) -> Result<Enquiry, RepositoryError> {
        let enquiry = sqlx::query_as::<_, Enquiry>(
            "INSERT INTO enquiries (artist_id, client_id, first_name, last_name, email, message)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(new.artist_id)
        .bind(new.client_id)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email)
        .bind(&new.message)
        .fetch_one(self.pool)
        .await?;

        Ok(enquiry)
    }

    /// All enquiries addressed to one artist, newest-first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_artist(&self, artist_id: UserId) -> Result<Vec<Enquiry>, RepositoryError> {
        let enquiries = sqlx::query_as::<_, Enquiry>(
            "SELECT * FROM enquiries WHERE artist_id = $1 ORDER BY date_sent DESC",
        )
        .bind(artist_id)
        .fetch_all(self.pool)
        .await?;

        Ok(enquiries)
    }

    /// Get an enquiry by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: EnquiryId) -> Result<Option<Enquiry>, RepositoryError> {
        let enquiry = sqlx::query_as::<_, Enquiry>("SELECT * FROM enquiries WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(enquiry)
    }

    /// Set the workflow status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the enquiry doesn't exist.
    pub async fn set_status(
        &self,
        id: EnquiryId,
        status: EnquiryStatus,
    ) -> Result<Enquiry, RepositoryError> {
        let enquiry = sqlx::query_as::<_, Enquiry>(
            "UPDATE enquiries SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(enquiry)
    }
}
