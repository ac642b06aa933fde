use chrono::Utc;

use super::AdminService;
use super::validation::validate_credentials;
use crate::auth::{AdminClaims, AdminIdentity, PasswordHasher};
use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::ObjectId;

impl AdminService {
    /// Checks an admin's password and issues a session token.
    pub fn login(&self, username: &str, password: &str) -> Result<String> {
        let admin = self
            .store
            .get_admin_by_username(username)?
            .ok_or_else(|| {
                tracing::info!("Login attempt for unknown admin '{username}'");
                Error::NotFound
            })?;

        if !self.hasher.verify(password, &admin.password_hash)? {
            tracing::info!("Login attempt with wrong password for '{username}'");
            return Err(Error::InvalidCredentials);
        }

        let token = self.signer.issue(&AdminClaims::new(admin.id, Utc::now()))?;
        tracing::info!("Admin '{username}' logged in");
        Ok(token)
    }

    /// Validates a session token and returns the admin it was issued to.
    pub fn authorize(&self, token: &str) -> Result<AdminIdentity> {
        let claims = self.signer.verify(token)?;
        if !claims.is_admin {
            return Err(Error::Unauthorized);
        }
        Ok(AdminIdentity {
            admin_id: claims.admin_id,
        })
    }
}

/// Creates the admin, or resets its password if the username exists.
pub fn provision_admin(store: &dyn Store, username: &str, password: &str) -> Result<ObjectId> {
    validate_credentials(username, password)?;
    let hash = PasswordHasher::new().hash(password)?;
    let id = store.upsert_admin(username.trim(), &hash)?;
    tracing::info!("Provisioned admin '{}' ({id})", username.trim());
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{JwtSigner, TokenSigner};
    use crate::testing::TestHarness;

    #[test]
    fn test_login_success_carries_admin_id_and_expiry() {
        let h = TestHarness::new();
        let admin_id = provision_admin(h.store.as_ref(), "root", "s3cret").unwrap();

        let token = h.service.login("root", "s3cret").unwrap();
        let claims = JwtSigner::new(TestHarness::SECRET).unwrap().verify(&token).unwrap();

        assert_eq!(claims.admin_id, admin_id);
        assert!(claims.is_admin);
        let expected = Utc::now().timestamp() + 72 * 3600;
        assert!((claims.exp - expected).abs() <= 5);
    }

    #[test]
    fn test_login_wrong_password() {
        let h = TestHarness::new();
        provision_admin(h.store.as_ref(), "root", "s3cret").unwrap();

        assert!(matches!(
            h.service.login("root", "wrong"),
            Err(Error::InvalidCredentials)
        ));
    }

    #[test]
    fn test_login_unknown_user() {
        let h = TestHarness::new();
        assert!(matches!(
            h.service.login("ghost", "whatever"),
            Err(Error::NotFound)
        ));
    }

    #[test]
    fn test_authorize_round_trip() {
        let h = TestHarness::new();
        let admin_id = provision_admin(h.store.as_ref(), "root", "s3cret").unwrap();
        let token = h.service.login("root", "s3cret").unwrap();

        let identity = h.service.authorize(&token).unwrap();
        assert_eq!(identity.admin_id, admin_id);
    }

    #[test]
    fn test_authorize_rejects_non_admin_claims() {
        let h = TestHarness::new();
        let signer = JwtSigner::new(TestHarness::SECRET).unwrap();
        let mut claims = AdminClaims::new(ObjectId::new(), Utc::now());
        claims.is_admin = false;
        let token = signer.issue(&claims).unwrap();

        assert!(matches!(h.service.authorize(&token), Err(Error::Unauthorized)));
    }

    #[test]
    fn test_authorize_rejects_garbage() {
        let h = TestHarness::new();
        assert!(matches!(
            h.service.authorize("not.a.token"),
            Err(Error::Unauthorized)
        ));
    }

    #[test]
    fn test_provision_is_idempotent_and_resets_password() {
        let h = TestHarness::new();
        let first = provision_admin(h.store.as_ref(), "root", "old-pass").unwrap();
        let second = provision_admin(h.store.as_ref(), "root", "new-pass").unwrap();
        assert_eq!(first, second);

        assert!(matches!(
            h.service.login("root", "old-pass"),
            Err(Error::InvalidCredentials)
        ));
        assert!(h.service.login("root", "new-pass").is_ok());
    }

    #[test]
    fn test_provision_validates_input() {
        let h = TestHarness::new();
        assert!(matches!(
            provision_admin(h.store.as_ref(), "", "pass"),
            Err(Error::InvalidInput(_))
        ));
        assert!(!h.store.has_admin().unwrap());
    }
}
