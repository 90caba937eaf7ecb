use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::config::AuthConfig;
use crate::credentials::TokenService;
use crate::error::ApiError;

/// Gate in front of the protected routes.
#[derive(Clone)]
pub enum AuthGate {
    /// Authentication disabled; every request passes unchecked.
    Pass,
    /// A valid bearer token is required.
    Check(TokenService),
}

impl AuthGate {
    pub fn new(config: &AuthConfig) -> Self {
        if config.enabled {
            Self::Check(TokenService::new(config))
        } else {
            Self::Pass
        }
    }

    pub fn check(&self, headers: &HeaderMap) -> Result<(), ApiError> {
        let tokens = match self {
            Self::Pass => return Ok(()),
            Self::Check(tokens) => tokens,
        };

        let auth_header = headers
            .get(header::AUTHORIZATION)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".into()))?;

        let token = auth_header
            .to_str()
            .ok()
            .and_then(bearer_token)
            .ok_or_else(|| ApiError::Unauthorized("Invalid authorization format".into()))?;

        tokens.validate(token).map(|_| ()).map_err(|e| {
            warn!("Rejected token: {}", e);
            ApiError::Unauthorized(format!("Invalid token: {}", e))
        })
    }
}

/// Accepts exactly `Bearer <token>`.
fn bearer_token(value: &str) -> Option<&str> {
    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Some(token),
        _ => None,
    }
}

/// Extract and validate JWT from Authorization header.
pub async fn require_auth(
    State(gate): State<AuthGate>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    gate.check(req.headers())?;
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, middleware, routing::get};
    use tower::ServiceExt;

    fn app(gate: AuthGate) -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .route_layer(middleware::from_fn_with_state(gate, require_auth))
    }

    fn config() -> AuthConfig {
        AuthConfig::new("gate-secret")
    }

    async fn status(gate: AuthGate, authorization: Option<&str>) -> StatusCode {
        let mut req = Request::builder().uri("/");
        if let Some(value) = authorization {
            req = req.header(header::AUTHORIZATION, value);
        }
        let res = app(gate).oneshot(req.body(Body::empty()).unwrap()).await.unwrap();
        res.status()
    }

    #[tokio::test]
    async fn disabled_gate_passes_everything() {
        let gate = AuthGate::new(&config().with_enabled(false));
        assert!(matches!(gate, AuthGate::Pass));
        assert_eq!(status(gate.clone(), None).await, StatusCode::OK);
        assert_eq!(status(gate, Some("Bearer junk")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn valid_token_passes() {
        let token = TokenService::new(&config()).issue("u1").unwrap();
        let header = format!("Bearer {}", token);
        assert_eq!(status(AuthGate::new(&config()), Some(&header)).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn rejects_missing_and_malformed_headers() {
        let gate = AuthGate::new(&config());
        let token = TokenService::new(&config()).issue("u1").unwrap();

        assert_eq!(status(gate.clone(), None).await, StatusCode::UNAUTHORIZED);
        assert_eq!(status(gate.clone(), Some(&token)).await, StatusCode::UNAUTHORIZED);
        assert_eq!(
            status(gate.clone(), Some(&format!("Basic {}", token))).await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status(gate, Some(&format!("Bearer {} extra", token))).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn rejection_messages_name_the_cause() {
        let gate = AuthGate::new(&config());
        let mut headers = HeaderMap::new();

        let err = gate.check(&headers).unwrap_err();
        assert_eq!(err.to_string(), "Missing authorization header");

        headers.insert(header::AUTHORIZATION, "Token abc".parse().unwrap());
        let err = gate.check(&headers).unwrap_err();
        assert_eq!(err.to_string(), "Invalid authorization format");

        let foreign = TokenService::new(&AuthConfig::new("other")).issue("u1").unwrap();
        headers.insert(
            header::AUTHORIZATION,
            format!("Bearer {}", foreign).parse().unwrap(),
        );
        let err = gate.check(&headers).unwrap_err();
        assert_eq!(err.to_string(), "Invalid token: token signature is invalid");
    }
}
