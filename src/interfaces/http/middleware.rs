//! Authentication and role-policy middleware for Axum
//!
//! Every protected route runs [`authorize`]: the bearer token is validated
//! first (401 on failure), then the route's [`Policy`] is checked against the
//! caller's role (403). Only then does the handler run.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;
use uuid::Uuid;

use crate::application::{AuthError, Principal, TokenValidator};
use crate::domain::{Policy, Role};
use crate::interfaces::http::common::ApiError;

/// Token validation shared by every protected router
#[derive(Clone)]
pub struct AuthState {
    pub validator: Arc<dyn TokenValidator>,
}

impl AuthState {
    pub fn new(validator: Arc<dyn TokenValidator>) -> Self {
        Self { validator }
    }

    /// Middleware state guarding a route group with `policy`.
    pub fn guard(&self, policy: Policy) -> PolicyGuard {
        PolicyGuard {
            auth: self.clone(),
            policy,
        }
    }
}

/// State of the [`authorize`] middleware
#[derive(Clone)]
pub struct PolicyGuard {
    pub auth: AuthState,
    pub policy: Policy,
}

/// Caller identity, available to handlers behind [`authorize`].
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl From<Principal> for AuthenticatedUser {
    fn from(p: Principal) -> Self {
        Self {
            user_id: p.subject,
            email: p.email,
            role: p.role,
        }
    }
}

fn extract_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::InvalidToken)
}

fn check(guard: &PolicyGuard, headers: &HeaderMap) -> Result<AuthenticatedUser, AuthError> {
    let token = extract_token(headers)?;
    let principal = guard.auth.validator.validate(token)?;

    if !guard.policy.allows(principal.role) {
        debug!(user_id = %principal.subject, policy = ?guard.policy, "Access denied");
        return Err(AuthError::InsufficientPermissions);
    }
    Ok(principal.into())
}

/// Bearer authentication followed by the guard's policy check.
pub async fn authorize(
    State(guard): State<PolicyGuard>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match check(&guard, request.headers()) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AuthError::MissingToken.into())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{middleware, Router};
    use tower::ServiceExt;

    use super::*;

    /// Accepts tokens of the form `<role>:<uuid>`.
    struct StaticValidator;

    impl TokenValidator for StaticValidator {
        fn validate(&self, token: &str) -> Result<Principal, AuthError> {
            let (role, id) = token.split_once(':').ok_or(AuthError::InvalidToken)?;
            Ok(Principal {
                subject: Uuid::parse_str(id).map_err(|_| AuthError::InvalidToken)?,
                email: "t@example.com".into(),
                role: role.parse().map_err(|_| AuthError::InvalidToken)?,
            })
        }
    }

    async fn whoami(user: AuthenticatedUser) -> String {
        user.role.to_string()
    }

    fn app(policy: Policy) -> Router {
        let auth = AuthState::new(Arc::new(StaticValidator));
        Router::new()
            .route("/", get(whoami))
            .route_layer(middleware::from_fn_with_state(auth.guard(policy), authorize))
    }

    async fn status(policy: Policy, authorization: Option<&str>) -> StatusCode {
        let mut req = Request::get("/");
        if let Some(value) = authorization {
            req = req.header(header::AUTHORIZATION, value);
        }
        app(policy)
            .oneshot(req.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn missing_or_malformed_token_is_401() {
        assert_eq!(status(Policy::Read, None).await, StatusCode::UNAUTHORIZED);
        assert_eq!(
            status(Policy::Read, Some("Basic abc")).await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status(Policy::Read, Some("Bearer garbage")).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn policy_decides_between_200_and_403() {
        let id = Uuid::new_v4();
        let customer = format!("Bearer customer:{id}");
        let admin = format!("Bearer admin:{id}");

        assert_eq!(status(Policy::Read, Some(&customer)).await, StatusCode::OK);
        assert_eq!(status(Policy::Read, Some(&admin)).await, StatusCode::OK);
        assert_eq!(
            status(Policy::Manage, Some(&customer)).await,
            StatusCode::FORBIDDEN
        );
        assert_eq!(status(Policy::Manage, Some(&admin)).await, StatusCode::OK);
    }
}
