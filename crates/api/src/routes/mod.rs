//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (database ping)
//!
//! # Auth
//! POST /auth/register               - Register and receive a session token
//! POST /auth/login                  - Login and receive a session token
//! GET  /auth/validate               - Resolve a bearer token to its user
//!
//! # Users & directory
//! GET  /user/profile                - Current user's profile (auth)
//! PUT  /user/profile                - Partial profile update (auth)
//! POST /user/profile-image          - Upload profile image (auth)
//! GET  /user/artists/all            - All artists, newest-first
//! GET  /user/saved-artists          - Resolved saved artists (auth)
//! POST /user/save-artist/{id}       - Save an artist (auth)
//! DELETE /user/save-artist/{id}     - Unsave an artist, idempotent (auth)
//! GET  /user/{id}                   - Public profile (no email)
//!
//! # Artworks
//! GET  /artworks                    - Paginated listing with filters
//! POST /artworks                    - Publish artwork, multipart (artist)
//! GET  /artworks/{id}               - Detail with full artist profile
//! PUT  /artworks/{id}               - Partial update (owner)
//! DELETE /artworks/{id}             - Delete (owner)
//! GET  /artworks/artist/{user_id}   - All artworks of one artist
//!
//! # Categories
//! GET  /categories                  - All categories by name
//! POST /categories                  - Create category (auth)
//! GET  /categories/{id}             - Category by id
//!
//! # Enquiries
//! POST /enquiries                   - Send an enquiry (public)
//! GET  /enquiries                   - Enquiries for the caller (artist)
//! GET  /enquiries/{id}              - Read one; pending becomes read
//! PUT  /enquiries/{id}/status       - Explicit status update (artist)
//! ```

pub mod artworks;
pub mod auth;
pub mod categories;
pub mod enquiries;
pub mod users;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Request body ceiling for upload routes. Generous on purpose: the
/// per-kind media ceilings in `MediaStore` are the authoritative limits and
/// produce the proper 413 body.
const UPLOAD_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/validate", get(auth::validate))
}

/// Create the user and directory routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(users::profile).put(users::update_profile))
        .route("/profile-image", post(users::upload_profile_image))
        .route("/artists/all", get(users::artists_all))
        .route("/saved-artists", get(users::saved_artists))
        .route(
            "/save-artist/{id}",
            post(users::save_artist).delete(users::unsave_artist),
        )
        .route("/{id}", get(users::public_profile))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}

/// Create the artwork routes router.
pub fn artwork_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(artworks::index).post(artworks::create))
        .route(
            "/{id}",
            get(artworks::show)
                .put(artworks::update)
                .delete(artworks::delete),
        )
        .route("/artist/{user_id}", get(artworks::by_artist))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index).post(categories::create))
        .route("/{id}", get(categories::show))
}

/// Create the enquiry routes router.
pub fn enquiry_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(enquiries::index).post(enquiries::create))
        .route("/{id}", get(enquiries::show))
        .route("/{id}/status", put(enquiries::set_status))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/user", user_routes())
        .nest("/artworks", artwork_routes())
        .nest("/categories", category_routes())
        .nest("/enquiries", enquiry_routes())
}
