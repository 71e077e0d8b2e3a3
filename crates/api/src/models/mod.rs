//! Domain types serialized on the API surface.
//!
//! These types are what handlers return as JSON. Projections that must
//! exclude sensitive fields (password hash, private email) are separate
//! structs rather than serde-skipped fields, so a leak is a type error.

pub mod artwork;
pub mod category;
pub mod enquiry;
pub mod user;

pub use artwork::{Artwork, ArtworkDetail, ArtworkUpdate, ArtworkWithArtist, ArtistSummary};
pub use category::Category;
pub use enquiry::Enquiry;
pub use user::{ProfileUpdate, PublicProfile, SocialLinks, User, UserSummary};
