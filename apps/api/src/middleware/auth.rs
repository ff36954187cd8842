//! Authentication context for GraphQL requests
//!
//! The context is built once per request, before any resolver runs, and is
//! immutable afterwards. There is no shared session state; each request
//! carries its own resolved user (or its absence).

use axum::http::{header, HeaderMap};

use crate::error::{ApiError, ApiResult};
use crate::models::User;
use crate::repositories::UserRepository;
use crate::services::AuthService;

/// Immutable per-request authentication context
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    /// The resolved current user, when the request carried a valid token
    /// for a user that still exists
    pub current_user: Option<User>,
}

impl AuthContext {
    /// Context for a request with no credential
    pub fn anonymous() -> Self {
        Self { current_user: None }
    }

    /// Context for an authenticated request
    pub fn for_user(user: User) -> Self {
        Self {
            current_user: Some(user),
        }
    }

    /// The current user, or `Unauthorized` when the context is anonymous
    pub fn require_user(&self) -> ApiResult<&User> {
        self.current_user.as_ref().ok_or(ApiError::Unauthorized)
    }
}

/// Extract the bearer token from the Authorization header
/// (case-insensitive scheme, rejecting malformed values)
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?;

    let mut parts = value.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;

    // Reject malformed values like "Bearer <token> <extra>"
    if parts.next().is_some() {
        return None;
    }

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

/// Resolve an inbound bearer token into an [`AuthContext`].
///
/// - No token: anonymous context.
/// - Invalid token: the whole request fails; no resolver may run with a
///   partially built context.
/// - Valid token whose subject no longer exists: anonymous context (a user
///   is never fabricated from claims alone).
pub async fn build_auth_context(
    token: Option<&str>,
    auth_service: &AuthService,
    user_repo: &UserRepository,
) -> ApiResult<AuthContext> {
    let Some(token) = token else {
        return Ok(AuthContext::anonymous());
    };

    let claims = auth_service.verify_token(token)?;

    match user_repo.find_by_id(claims.sub).await? {
        Some(user) => Ok(AuthContext::for_user(user)),
        None => {
            tracing::debug!(user_id = %claims.sub, "Token subject no longer exists");
            Ok(AuthContext::anonymous())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::http::Request;

    #[test]
    fn test_extract_bearer_token_valid() {
        let request = Request::builder()
            .header(header::AUTHORIZATION, "Bearer test_token_123")
            .body(())
            .unwrap();

        let (parts, _) = request.into_parts();
        assert_eq!(extract_bearer_token(&parts.headers), Some("test_token_123"));
    }

    #[test]
    fn test_extract_bearer_token_case_insensitive_scheme() {
        let request = Request::builder()
            .header(header::AUTHORIZATION, "bearer test_token_123")
            .body(())
            .unwrap();

        let (parts, _) = request.into_parts();
        assert_eq!(extract_bearer_token(&parts.headers), Some("test_token_123"));
    }

    #[test]
    fn test_extract_bearer_token_missing() {
        let request = Request::builder().body(()).unwrap();
        let (parts, _) = request.into_parts();
        assert_eq!(extract_bearer_token(&parts.headers), None);
    }

    #[test]
    fn test_extract_bearer_token_invalid_scheme() {
        let request = Request::builder()
            .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .body(())
            .unwrap();

        let (parts, _) = request.into_parts();
        assert_eq!(extract_bearer_token(&parts.headers), None);
    }

    #[test]
    fn test_extract_bearer_token_rejects_trailing_junk() {
        let request = Request::builder()
            .header(header::AUTHORIZATION, "Bearer token extra")
            .body(())
            .unwrap();

        let (parts, _) = request.into_parts();
        assert_eq!(extract_bearer_token(&parts.headers), None);
    }

    #[test]
    fn test_anonymous_context_requires_user() {
        let ctx = AuthContext::anonymous();
        assert_matches!(ctx.require_user(), Err(ApiError::Unauthorized));
    }
}
