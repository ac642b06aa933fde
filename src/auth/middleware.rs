use std::sync::Arc;

use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderValue, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::AdminIdentity;
use super::helpers::{TokenExtractionError, extract_token_from_header};
use crate::server::AppState;

/// Extractor that requires a valid admin session token.
pub struct RequireAdmin(pub AdminIdentity);

#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    MissingAuth,
    InvalidScheme,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingAuth => "Authentication required",
            AuthError::InvalidScheme => "Invalid authorization scheme",
            AuthError::InvalidToken => "Invalid or expired token",
        };

        let body = json!({ "data": null, "error": message });
        let mut response = (StatusCode::UNAUTHORIZED, Json(body)).into_response();
        response.headers_mut().insert(
            header::WWW_AUTHENTICATE,
            HeaderValue::from_static("Bearer realm=\"mentorboard\""),
        );
        response
    }
}

impl FromRequestParts<Arc<AppState>> for RequireAdmin {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let raw_token = extract_token_from_header(auth_header)
            .map_err(|e| match e {
                TokenExtractionError::InvalidScheme => AuthError::InvalidScheme,
                TokenExtractionError::EmptyToken => AuthError::InvalidToken,
            })?
            .ok_or(AuthError::MissingAuth)?;

        let identity = state.service.authorize(raw_token).map_err(|e| {
            tracing::debug!("Rejected admin token: {e}");
            AuthError::InvalidToken
        })?;

        Ok(RequireAdmin(identity))
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, http::Request, routing::get};
    use chrono::{Duration, Utc};
    use tower::ServiceExt;

    use super::*;
    use crate::auth::{AdminClaims, JwtSigner, TokenSigner};
    use crate::testing::TestHarness;
    use crate::types::ObjectId;

    async fn whoami(RequireAdmin(identity): RequireAdmin) -> String {
        identity.admin_id.to_hex()
    }

    fn app() -> Router {
        let h = TestHarness::new();
        let state = Arc::new(AppState {
            service: Arc::new(h.service),
        });
        Router::new().route("/me", get(whoami)).with_state(state)
    }

    async fn call(app: Router, auth: Option<&str>) -> Response {
        let mut request = Request::builder().uri("/me");
        if let Some(value) = auth {
            request = request.header(header::AUTHORIZATION, value);
        }
        app.oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    fn signed(claims: &AdminClaims) -> String {
        JwtSigner::new(TestHarness::SECRET)
            .unwrap()
            .issue(claims)
            .unwrap()
    }

    fn assert_unauthorized(response: &Response) {
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers()[header::WWW_AUTHENTICATE],
            "Bearer realm=\"mentorboard\""
        );
    }

    #[tokio::test]
    async fn test_valid_token_passes_admin_id() {
        let admin_id = ObjectId::new();
        let token = signed(&AdminClaims::new(admin_id, Utc::now()));

        let response = call(app(), Some(&format!("Bearer {token}"))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body, admin_id.to_hex().as_bytes());
    }

    #[tokio::test]
    async fn test_missing_header() {
        assert_unauthorized(&call(app(), None).await);
    }

    #[tokio::test]
    async fn test_wrong_scheme() {
        assert_unauthorized(&call(app(), Some("Basic abc")).await);
    }

    #[tokio::test]
    async fn test_expired_token() {
        let issued = Utc::now() - Duration::hours(73);
        let token = signed(&AdminClaims::new(ObjectId::new(), issued));
        assert_unauthorized(&call(app(), Some(&format!("Bearer {token}"))).await);
    }

    #[tokio::test]
    async fn test_non_admin_claims() {
        let mut claims = AdminClaims::new(ObjectId::new(), Utc::now());
        claims.is_admin = false;
        let token = signed(&claims);
        assert_unauthorized(&call(app(), Some(&format!("Bearer {token}"))).await);
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret() {
        let token = JwtSigner::new(b"someone-else")
            .unwrap()
            .issue(&AdminClaims::new(ObjectId::new(), Utc::now()))
            .unwrap();
        assert_unauthorized(&call(app(), Some(&format!("Bearer {token}"))).await);
    }
}
