//! Media ingestion.
//!
//! Validates uploaded images, derives resized variants, and writes them
//! under the uploads directory. Decoding and resizing are CPU-bound and run
//! on the blocking pool; everything stored is re-encoded as JPEG so the
//! served variants are uniform regardless of the upload format.

use std::io::Cursor;
use std::path::PathBuf;

use image::{DynamicImage, ImageFormat, imageops::FilterType};
use thiserror::Error;
use uuid::Uuid;

/// Square profile thumbnail edge, in pixels.
const PROFILE_THUMB_SIZE: u32 = 300;
/// Bounding box for artwork listing thumbnails.
const ARTWORK_THUMB_SIZE: u32 = 400;
/// Bounding box for artwork detail images.
const ARTWORK_MEDIUM_SIZE: u32 = 1200;

/// Errors that can occur during media ingestion.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The uploaded content type is not an image.
    #[error("Only image files are allowed (got {0})")]
    UnsupportedType(String),

    /// The upload exceeds the per-kind size ceiling.
    #[error("File exceeds the maximum size of {limit} bytes")]
    TooLarge {
        /// The ceiling that was exceeded, in bytes.
        limit: usize,
    },

    /// The payload could not be decoded as an image.
    #[error("unable to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// Writing a stored file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking image-processing task panicked or was cancelled.
    #[error("image processing task failed")]
    Task,
}

/// The kind of upload, which selects size ceiling, directory, and variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Profile picture: one square thumbnail.
    Profile,
    /// Artwork: bounded-box thumbnail and medium variants plus the original.
    Artwork,
}

impl MediaKind {
    /// Per-kind upload ceiling in bytes.
    #[must_use]
    pub const fn max_bytes(self) -> usize {
        match self {
            Self::Profile => 5 * 1024 * 1024,
            Self::Artwork => 10 * 1024 * 1024,
        }
    }

    const fn subdir(self) -> &'static str {
        match self {
            Self::Profile => "profiles",
            Self::Artwork => "artworks",
        }
    }

    const fn prefix(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Artwork => "artwork",
        }
    }
}

/// Filenames of the stored variants of one upload.
#[derive(Debug, Clone)]
pub struct StoredMedia {
    /// Full-size image.
    pub original: String,
    /// Listing thumbnail (`thumb-` prefix).
    pub thumbnail: String,
    /// Detail-view variant (`medium-` prefix); artwork uploads only.
    pub medium: Option<String>,
}

/// Stores uploaded images and their derived variants on the local filesystem.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    /// Create a store rooted at the uploads directory.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Create the per-kind subdirectories if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        for kind in [MediaKind::Profile, MediaKind::Artwork] {
            tokio::fs::create_dir_all(self.root.join(kind.subdir())).await?;
        }
        Ok(())
    }

    /// Validate an upload, derive its variants, and write everything to disk.
    ///
    /// Returns the stored filenames; callers persist these on the owning
    /// record and clients resolve them against the static `/uploads` prefix.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::UnsupportedType` for non-image content types,
    /// `MediaError::TooLarge` above the kind's ceiling, and
    /// `MediaError::Decode` for payloads that aren't a decodable image.
    pub async fn store(
        &self,
        data: Vec<u8>,
        content_type: &str,
        kind: MediaKind,
    ) -> Result<StoredMedia, MediaError> {
        if !content_type.starts_with("image/") {
            return Err(MediaError::UnsupportedType(content_type.to_owned()));
        }

        if data.len() > kind.max_bytes() {
            return Err(MediaError::TooLarge {
                limit: kind.max_bytes(),
            });
        }

        let base = format!("{}-{}.jpg", kind.prefix(), Uuid::new_v4());

        // Decode + resize + encode on the blocking pool; the async runtime
        // only sees the finished buffers.
        let variants = tokio::task::spawn_blocking({
            let base = base.clone();
            move || derive_variants(&data, kind, &base)
        })
        .await
        .map_err(|_| MediaError::Task)??;

        let dir = self.root.join(kind.subdir());
        for (filename, bytes) in &variants {
            tokio::fs::write(dir.join(filename), bytes).await?;
        }

        Ok(StoredMedia {
            original: base.clone(),
            thumbnail: format!("thumb-{base}"),
            medium: matches!(kind, MediaKind::Artwork).then(|| format!("medium-{base}")),
        })
    }
}

/// Decode the upload and produce `(filename, jpeg bytes)` for each variant.
fn derive_variants(
    data: &[u8],
    kind: MediaKind,
    base: &str,
) -> Result<Vec<(String, Vec<u8>)>, MediaError> {
    // JPEG has no alpha channel; flatten whatever was uploaded to RGB first.
    let img = DynamicImage::ImageRgb8(image::load_from_memory(data)?.to_rgb8());

    let mut variants = Vec::with_capacity(3);
    variants.push((base.to_owned(), encode_jpeg(&img)?));

    match kind {
        MediaKind::Profile => {
            let thumb = img.resize_to_fill(PROFILE_THUMB_SIZE, PROFILE_THUMB_SIZE, FilterType::Lanczos3);
            variants.push((format!("thumb-{base}"), encode_jpeg(&thumb)?));
        }
        MediaKind::Artwork => {
            let thumb = img.thumbnail(ARTWORK_THUMB_SIZE, ARTWORK_THUMB_SIZE);
            variants.push((format!("thumb-{base}"), encode_jpeg(&thumb)?));

            let medium = img.resize(ARTWORK_MEDIUM_SIZE, ARTWORK_MEDIUM_SIZE, FilterType::Lanczos3);
            variants.push((format!("medium-{base}"), encode_jpeg(&medium)?));
        }
    }

    Ok(variants)
}

/// Encode an image as JPEG into a fresh buffer.
fn encode_jpeg(img: &DynamicImage) -> Result<Vec<u8>, MediaError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    /// A small valid PNG for upload tests.
    fn sample_png(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_pixel(width, height, Rgb::<u8>([120, 30, 200]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .expect("encode sample png");
        buf
    }

    fn temp_store() -> MediaStore {
        let dir = std::env::temp_dir().join(format!("artfolio-media-{}", Uuid::new_v4()));
        MediaStore::new(dir)
    }

    #[tokio::test]
    async fn test_store_rejects_non_image_type() {
        let store = temp_store();
        let result = store
            .store(b"hello".to_vec(), "text/plain", MediaKind::Profile)
            .await;
        assert!(matches!(result, Err(MediaError::UnsupportedType(_))));
    }

    #[tokio::test]
    async fn test_store_rejects_oversized_payload() {
        let store = temp_store();
        let oversized = vec![0_u8; MediaKind::Profile.max_bytes() + 1];
        let result = store.store(oversized, "image/png", MediaKind::Profile).await;
        assert!(matches!(
            result,
            Err(MediaError::TooLarge { limit }) if limit == MediaKind::Profile.max_bytes()
        ));
    }

    #[tokio::test]
    async fn test_store_rejects_undecodable_image() {
        let store = temp_store();
        store.ensure_dirs().await.expect("create dirs");
        let result = store
            .store(b"not an image".to_vec(), "image/png", MediaKind::Profile)
            .await;
        assert!(matches!(result, Err(MediaError::Decode(_))));
    }

    #[tokio::test]
    async fn test_store_profile_derives_square_thumbnail() {
        let store = temp_store();
        store.ensure_dirs().await.expect("create dirs");

        let stored = store
            .store(sample_png(640, 480), "image/png", MediaKind::Profile)
            .await
            .expect("store profile image");

        assert!(stored.medium.is_none());
        assert_eq!(stored.thumbnail, format!("thumb-{}", stored.original));

        let thumb_path = store.root.join("profiles").join(&stored.thumbnail);
        let thumb = image::open(&thumb_path).expect("open stored thumbnail");
        assert_eq!(thumb.width(), PROFILE_THUMB_SIZE);
        assert_eq!(thumb.height(), PROFILE_THUMB_SIZE);
    }

    #[tokio::test]
    async fn test_store_artwork_derives_bounded_variants() {
        let store = temp_store();
        store.ensure_dirs().await.expect("create dirs");

        let stored = store
            .store(sample_png(800, 400), "image/png", MediaKind::Artwork)
            .await
            .expect("store artwork image");

        let medium = stored.medium.as_deref().expect("medium variant");
        assert_eq!(medium, format!("medium-{}", stored.original));

        // Aspect ratio preserved: 800x400 fits 400x400 as 400x200.
        let thumb_path = store.root.join("artworks").join(&stored.thumbnail);
        let thumb = image::open(&thumb_path).expect("open stored thumbnail");
        assert_eq!(thumb.width(), 400);
        assert_eq!(thumb.height(), 200);
    }
}
