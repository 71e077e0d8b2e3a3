//! Enquiry workflow route handlers.

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use artfolio_core::{Email, EnquiryId, EnquiryStatus, UserId, UserRole};

use crate::db::enquiries::{EnquiryRepository, NewEnquiry};
use crate::db::users::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::enquiry::Enquiry;
use crate::models::user::User;
use crate::state::AppState;

/// Request for sending an enquiry to an artist.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnquiryRequest {
    pub artist_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
}

/// Send an enquiry. Open to anonymous callers; when the caller presents a
/// valid session for a client account, the enquiry records that client.
///
/// # Errors
///
/// Returns 404 when the target isn't an artist, 400 for missing fields.
pub async fn create(
    OptionalAuth(caller): OptionalAuth,
    State(state): State<AppState>,
    Json(body): Json<CreateEnquiryRequest>,
) -> Result<(StatusCode, Json<Enquiry>)> {
    for (value, label) in [
        (&body.first_name, "First name"),
        (&body.last_name, "Last name"),
        (&body.message, "Message"),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest(format!("{label} is required")));
        }
    }

    let email = Email::parse(&body.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let users = UserRepository::new(state.pool());
    let artist = users.find_by_id(body.artist_id).await?;
    if !matches!(&artist, Some(user) if user.role.is_artist()) {
        return Err(AppError::NotFound("Artist not found".to_owned()));
    }

    // An invalid or expired token was already dropped by OptionalAuth;
    // only a logged-in client is recorded on the enquiry.
    let client_id = client_id_of(caller.as_ref());

    let enquiry = EnquiryRepository::new(state.pool())
        .create(&NewEnquiry {
            artist_id: body.artist_id,
            client_id,
            first_name: body.first_name.trim().to_owned(),
            last_name: body.last_name.trim().to_owned(),
            email: email.into_inner(),
            message: body.message,
        })
        .await?;

    tracing::info!(enquiry_id = %enquiry.id, artist_id = %enquiry.artist_id, "enquiry created");

    Ok((StatusCode::CREATED, Json(enquiry)))
}

/// All enquiries addressed to the caller, newest-first. Artists only.
///
/// # Errors
///
/// Returns 403 for non-artists.
pub async fn index(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Enquiry>>> {
    if !user.role.is_artist() {
        return Err(AppError::Forbidden(
            "Only artists can view enquiries".to_owned(),
        ));
    }

    let enquiries = EnquiryRepository::new(state.pool())
        .list_for_artist(user.id)
        .await?;

    Ok(Json(enquiries))
}

/// One enquiry. The first read by the target artist moves `pending` to
/// `read` as a side effect; later statuses are never regressed.
///
/// # Errors
///
/// Returns 404 when absent, 403 when the caller isn't the target artist.
pub async fn show(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<EnquiryId>,
) -> Result<Json<Enquiry>> {
    let repo = EnquiryRepository::new(state.pool());
    let enquiry = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Enquiry not found".to_owned()))?;

    ensure_recipient(&enquiry, &user, "Not authorized to view this enquiry")?;

    let after_read = enquiry.status.after_artist_read();
    if after_read == enquiry.status {
        return Ok(Json(enquiry));
    }

    Ok(Json(repo.set_status(id, after_read).await?))
}

/// Request for an explicit status update.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

/// Explicit status update by the target artist.
///
/// # Errors
///
/// Returns 400 for a status outside the enumerated set, 404 when absent,
/// 403 when the caller isn't the target artist.
pub async fn set_status(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<EnquiryId>,
    Json(body): Json<SetStatusRequest>,
) -> Result<Json<Enquiry>> {
    let status = EnquiryStatus::from_str(&body.status)
        .map_err(|_| AppError::BadRequest("Invalid status".to_owned()))?;

    let repo = EnquiryRepository::new(state.pool());
    let enquiry = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Enquiry not found".to_owned()))?;

    ensure_recipient(&enquiry, &user, "Not authorized to update this enquiry")?;

    Ok(Json(repo.set_status(id, status).await?))
}

/// The caller's id when they are a logged-in client, otherwise `None`.
fn client_id_of(caller: Option<&User>) -> Option<UserId> {
    caller
        .filter(|user| user.role == UserRole::Client)
        .map(|user| user.id)
}

/// Only the target artist may act on an enquiry.
fn ensure_recipient(enquiry: &Enquiry, user: &User, message: &str) -> Result<()> {
    if enquiry.artist_id == user.id {
        Ok(())
    } else {
        Err(AppError::Forbidden(message.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::SocialLinks;
    use chrono::Utc;

    fn user(id: i32, role: UserRole) -> User {
        User {
            id: UserId::new(id),
            email: Email::parse("someone@example.com").expect("valid email"),
            role,
            display_name: "Someone".to_owned(),
            profile_image: "default-profile.jpg".to_owned(),
            location: None,
            bio: None,
            professional_title: None,
            website: None,
            social_links: SocialLinks::default(),
            categories: vec![],
            created_at: Utc::now(),
            last_login: Utc::now(),
        }
    }

    fn enquiry(artist: i32, status: EnquiryStatus) -> Enquiry {
        Enquiry {
            id: EnquiryId::new(1),
            artist_id: UserId::new(artist),
            client_id: None,
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            message: "Is the original for sale?".to_owned(),
            status,
            date_sent: Utc::now(),
        }
    }

    #[test]
    fn test_recipient_check() {
        let e = enquiry(5, EnquiryStatus::Pending);
        assert!(ensure_recipient(&e, &user(5, UserRole::Artist), "no").is_ok());
        assert!(matches!(
            ensure_recipient(&e, &user(6, UserRole::Artist), "no"),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_client_id_recorded_for_clients_only() {
        let client = user(3, UserRole::Client);
        let artist = user(4, UserRole::Artist);
        assert_eq!(client_id_of(Some(&client)), Some(UserId::new(3)));
        assert_eq!(client_id_of(Some(&artist)), None);
        assert_eq!(client_id_of(None), None);
    }

    #[test]
    fn test_status_values_parse() {
        for (input, expected) in [
            ("pending", EnquiryStatus::Pending),
            ("read", EnquiryStatus::Read),
            ("replied", EnquiryStatus::Replied),
            ("archived", EnquiryStatus::Archived),
        ] {
            assert_eq!(EnquiryStatus::from_str(input), Ok(expected));
        }
        assert!(EnquiryStatus::from_str("deleted").is_err());
    }
}
