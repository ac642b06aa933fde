use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::ObjectId;

/// How long a login session stays valid.
pub const SESSION_TTL: Duration = Duration::hours(72);

/// Claims carried by an admin session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminClaims {
    pub admin_id: ObjectId,
    pub is_admin: bool,
    /// Expiry as unix seconds.
    pub exp: i64,
}

impl AdminClaims {
    #[must_use]
    pub fn new(admin_id: ObjectId, now: DateTime<Utc>) -> Self {
        Self {
            admin_id,
            is_admin: true,
            exp: (now + SESSION_TTL).timestamp(),
        }
    }
}

/// Issues and verifies signed session tokens.
pub trait TokenSigner: Send + Sync {
    fn issue(&self, claims: &AdminClaims) -> Result<String>;

    /// Returns `Error::Unauthorized` for any token that is malformed, badly
    /// signed or expired.
    fn verify(&self, token: &str) -> Result<AdminClaims>;
}

/// HS256 JSON Web Tokens keyed by a shared secret.
pub struct JwtSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtSigner {
    pub fn new(secret: &[u8]) -> Result<Self> {
        if secret.is_empty() {
            return Err(Error::Config("JWT secret cannot be empty".to_string()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        })
    }
}

impl TokenSigner for JwtSigner {
    fn issue(&self, claims: &AdminClaims) -> Result<String> {
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &self.encoding,
        )?)
    }

    fn verify(&self, token: &str) -> Result<AdminClaims> {
        jsonwebtoken::decode::<AdminClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Rejected session token: {e}");
                Error::Unauthorized
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_then_verify() {
        let signer = JwtSigner::new(b"test-secret").unwrap();
        let admin_id = ObjectId::new();
        let claims = AdminClaims::new(admin_id, Utc::now());

        let token = signer.issue(&claims).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let decoded = signer.verify(&token).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_expiry_is_72_hours_out() {
        let now = Utc::now();
        let claims = AdminClaims::new(ObjectId::new(), now);
        assert_eq!(claims.exp - now.timestamp(), 72 * 3600);
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() {
        let signer = JwtSigner::new(b"secret-a").unwrap();
        let other = JwtSigner::new(b"secret-b").unwrap();
        let token = signer
            .issue(&AdminClaims::new(ObjectId::new(), Utc::now()))
            .unwrap();

        assert!(matches!(other.verify(&token), Err(Error::Unauthorized)));
    }

    #[test]
    fn test_expired_token_is_unauthorized() {
        let signer = JwtSigner::new(b"secret").unwrap();
        let issued = Utc::now() - Duration::hours(73);
        let token = signer
            .issue(&AdminClaims::new(ObjectId::new(), issued))
            .unwrap();

        assert!(matches!(signer.verify(&token), Err(Error::Unauthorized)));
    }

    #[test]
    fn test_malformed_token_is_unauthorized() {
        let signer = JwtSigner::new(b"secret").unwrap();
        assert!(matches!(signer.verify("abc.def"), Err(Error::Unauthorized)));
        assert!(matches!(signer.verify(""), Err(Error::Unauthorized)));
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(JwtSigner::new(b""), Err(Error::Config(_))));
    }
}
