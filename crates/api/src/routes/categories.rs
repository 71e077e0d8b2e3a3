//! Category route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use artfolio_core::CategoryId;

use crate::db::CategoryRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::category::Category;
use crate::state::AppState;

/// Request for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// All categories, ordered by name.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = CategoryRepository::new(state.pool()).list().await?;
    Ok(Json(categories))
}

/// Create a new category. Requires a session.
///
/// # Errors
///
/// Returns 400 for a missing name, 409 for a duplicate one.
pub async fn create(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>)> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Category name is required".to_owned()));
    }

    let category = CategoryRepository::new(state.pool())
        .create(name, body.description.as_deref(), body.image.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// Category by id.
///
/// # Errors
///
/// Returns 404 when the category doesn't exist.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<Category>> {
    let category = CategoryRepository::new(state.pool())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_owned()))?;

    Ok(Json(category))
}
