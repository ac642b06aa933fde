//! Admin authentication: password hashing, session tokens and the axum
//! extractor guarding `/admin` routes.

mod helpers;
mod jwt;
mod middleware;
mod password;

pub use jwt::{AdminClaims, JwtSigner, SESSION_TTL, TokenSigner};
pub use middleware::{AuthError, RequireAdmin};
pub use password::PasswordHasher;

use crate::types::ObjectId;

/// The admin a verified session token was issued to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminIdentity {
    pub admin_id: ObjectId,
}
