//! Database operations against `PostgreSQL`.
//!
//! ## Tables
//!
//! - `users` - Accounts, profile fields, password hashes
//! - `saved_artists` - Saved-artist relationships (composite key)
//! - `artworks` - Published artworks with image variants
//! - `categories` - Named artwork categories
//! - `enquiries` - Artist-client messages with status workflow
//!
//! Queries are runtime-checked (`sqlx::query_as` with `FromRow` rows), so
//! the workspace builds without a live database.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p artfolio-cli -- migrate
//! ```

pub mod artworks;
pub mod categories;
pub mod enquiries;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use artworks::ArtworkRepository;
pub use categories::CategoryRepository;
pub use enquiries::EnquiryRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a unique-constraint violation to `Conflict`, everything else to
/// `Database`.
pub(crate) fn map_unique_violation(err: sqlx::Error, conflict_message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(conflict_message.to_owned());
    }
    RepositoryError::Database(err)
}
