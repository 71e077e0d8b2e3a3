//! Reference data seeding.

use super::{CommandError, connect};

/// The default category set presented to new installations.
const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("Painting", "Oil, acrylic, watercolour and mixed media"),
    ("Illustration", "Editorial, book and concept illustration"),
    ("Photography", "Fine art and documentary photography"),
    ("Sculpture", "Three-dimensional work in any material"),
    ("Digital Art", "Digitally native painting and 3D renders"),
    ("Printmaking", "Etching, screen printing and linocut"),
];

/// Insert the default categories, skipping names that already exist.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or an insert fails.
pub async fn categories() -> Result<(), CommandError> {
    let pool = connect().await?;

    let mut inserted = 0_u64;
    for (name, description) in DEFAULT_CATEGORIES {
        let result = sqlx::query(
            "INSERT INTO categories (name, description)
             VALUES ($1, $2)
             ON CONFLICT (name) DO NOTHING",
        )
        .bind(name)
        .bind(description)
        .execute(&pool)
        .await?;

        inserted += result.rows_affected();
    }

    tracing::info!(
        inserted,
        total = DEFAULT_CATEGORIES.len(),
        "Category seed complete"
    );
    Ok(())
}
