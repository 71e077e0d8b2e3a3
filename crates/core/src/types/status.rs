//! Enquiry status state machine.

use serde::{Deserialize, Serialize};

/// Lifecycle state of an enquiry.
///
/// Every enquiry starts `pending`. The first time the target artist fetches
/// it, it moves to `read` as a side effect of the fetch itself; from there
/// the artist may mark it `replied` or `archived`, or correct the status to
/// any of the four values explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "enquiry_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum EnquiryStatus {
    /// Delivered but not yet seen by the artist.
    #[default]
    Pending,
    /// Seen by the artist.
    Read,
    /// The artist has responded.
    Replied,
    /// Filed away by the artist.
    Archived,
}

impl EnquiryStatus {
    /// The status after the target artist fetches the enquiry.
    ///
    /// Only `pending` advances; a repeated read never regresses a later
    /// status back to `read`.
    #[must_use]
    pub const fn after_artist_read(self) -> Self {
        match self {
            Self::Pending => Self::Read,
            other => other,
        }
    }
}

impl std::fmt::Display for EnquiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Read => write!(f, "read"),
            Self::Replied => write!(f, "replied"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

impl std::str::FromStr for EnquiryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "read" => Ok(Self::Read),
            "replied" => Ok(Self::Replied),
            "archived" => Ok(Self::Archived),
            _ => Err(format!("invalid enquiry status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_pending() {
        assert_eq!(EnquiryStatus::default(), EnquiryStatus::Pending);
    }

    #[test]
    fn test_read_advances_pending_only() {
        assert_eq!(
            EnquiryStatus::Pending.after_artist_read(),
            EnquiryStatus::Read
        );
        // Repeated reads do not regress a later status.
        for status in [
            EnquiryStatus::Read,
            EnquiryStatus::Replied,
            EnquiryStatus::Archived,
        ] {
            assert_eq!(status.after_artist_read(), status);
        }
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&EnquiryStatus::Archived).expect("serialize"),
            "\"archived\""
        );
        let status: EnquiryStatus = serde_json::from_str("\"replied\"").expect("deserialize");
        assert_eq!(status, EnquiryStatus::Replied);
    }

    #[test]
    fn test_serde_rejects_unknown() {
        assert!(serde_json::from_str::<EnquiryStatus>("\"deleted\"").is_err());
    }
}
