//! Enquiry domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use artfolio_core::{EnquiryId, EnquiryStatus, UserId};

/// A message from a (possibly anonymous) sender to an artist.
///
/// `client_id` is set only when the sender presented a valid session for a
/// client account at creation time.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    pub id: EnquiryId,
    pub artist_id: UserId,
    pub client_id: Option<UserId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
    pub status: EnquiryStatus,
    pub date_sent: DateTime<Utc>,
}
