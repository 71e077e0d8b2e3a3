//! Artwork domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use artfolio_core::{ArtworkId, UserId};

use super::user::PublicProfile;

/// An artwork record.
///
/// Image fields hold filenames under the uploads directory; clients resolve
/// them against the static `/uploads/artworks/` prefix.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub id: ArtworkId,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub image: String,
    pub thumbnail: String,
    pub medium_image: String,
    pub tags: Vec<String>,
    pub artist_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// A partial artwork update; only supplied fields change.
///
/// Images are immutable after upload; replacing one means deleting the
/// artwork and publishing again.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// The restricted artist projection joined onto artwork listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistSummary {
    pub id: UserId,
    pub display_name: String,
    pub profile_image: String,
}

/// An artwork with its artist summary, as returned by listings.
#[derive(Debug, Clone, Serialize)]
pub struct ArtworkWithArtist {
    #[serde(flatten)]
    pub artwork: Artwork,
    pub artist: ArtistSummary,
}

/// An artwork joined with the full public artist profile (detail view).
#[derive(Debug, Clone, Serialize)]
pub struct ArtworkDetail {
    #[serde(flatten)]
    pub artwork: Artwork,
    pub artist: PublicProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_flattens_artwork_fields() {
        let item = ArtworkWithArtist {
            artwork: Artwork {
                id: ArtworkId::new(1),
                title: "Dusk".to_owned(),
                description: None,
                category: "painting".to_owned(),
                image: "artwork-abc.jpg".to_owned(),
                thumbnail: "thumb-artwork-abc.jpg".to_owned(),
                medium_image: "medium-artwork-abc.jpg".to_owned(),
                tags: vec![],
                artist_id: UserId::new(9),
                created_at: Utc::now(),
            },
            artist: ArtistSummary {
                id: UserId::new(9),
                display_name: "Mina".to_owned(),
                profile_image: "default-profile.jpg".to_owned(),
            },
        };

        let json = serde_json::to_value(&item).expect("serialize");
        assert_eq!(json["title"], "Dusk");
        assert_eq!(json["artist"]["displayName"], "Mina");
        assert_eq!(json["artistId"], 9);
    }
}
