//! Category domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use artfolio_core::CategoryId;

/// A named artwork category.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}
