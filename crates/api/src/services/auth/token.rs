//! Session token signing and verification.
//!
//! Tokens are HS256 JWTs over `{sub, role, iat, exp}` claims, opaque to
//! clients, valid for seven days.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use artfolio_core::{UserId, UserRole};

use super::AuthError;

/// Session token validity window.
const TOKEN_TTL_DAYS: i64 = 7;

/// JWT claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id, stringified.
    pub sub: String,
    /// Role at issue time.
    pub role: UserRole,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
}

/// Issues and verifies session tokens with a shared HS256 secret.
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenSigner {
    /// Create a signer from the configured secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        }
    }

    /// Issue a token for a user, valid for seven days.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenCreation` if signing fails.
    pub fn issue(&self, user_id: UserId, role: UserRole) -> Result<String, AuthError> {
        self.issue_with_ttl(user_id, role, Duration::days(TOKEN_TTL_DAYS))
    }

    fn issue_with_ttl(
        &self,
        user_id: UserId,
        role: UserRole,
        ttl: Duration,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .map_err(|_| AuthError::TokenCreation)
    }

    /// Verify a token and return the user id it was issued for.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the token is malformed, has a
    /// bad signature, or has expired.
    pub fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        let data =
            jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::default())
                .map_err(|_| AuthError::InvalidToken)?;

        let id: i32 = data.claims.sub.parse().map_err(|_| AuthError::InvalidToken)?;
        Ok(UserId::new(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(&SecretString::from("0123456789abcdef0123456789abcdef"))
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let signer = signer();
        let token = signer
            .issue(UserId::new(42), UserRole::Artist)
            .expect("issue token");
        assert_eq!(signer.verify(&token).expect("verify"), UserId::new(42));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(matches!(
            signer().verify("not-a-token"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = signer()
            .issue(UserId::new(1), UserRole::Client)
            .expect("issue token");
        let other = TokenSigner::new(&SecretString::from("ffffffffffffffffffffffffffffffff"));
        assert!(matches!(other.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_verify_rejects_expired() {
        let signer = signer();
        let token = signer
            .issue_with_ttl(UserId::new(1), UserRole::Artist, Duration::days(-1))
            .expect("issue token");
        assert!(matches!(signer.verify(&token), Err(AuthError::InvalidToken)));
    }
}
