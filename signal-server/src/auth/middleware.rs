//! Staff route guard
//!
//! Every `/api/` route except the guest surface and the health check needs a
//! bearer token; the resolved [`CurrentUser`] travels in request extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::{HeaderMap, Uri};

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// Paths reachable without a staff token
fn is_public_path(path: &str) -> bool {
    path == "/api/health" || path.starts_with("/api/public/")
}

/// Resolve the staff principal from the `Authorization` header
///
/// | Condition | Code |
/// |-----------|------|
/// | No header | 401 NotAuthenticated |
/// | Not a bearer header / bad token | 401 TokenInvalid |
/// | Expired token | 401 TokenExpired |
pub(crate) fn authenticate(
    jwt: &JwtService,
    headers: &HeaderMap,
    uri: &Uri,
) -> Result<CurrentUser, AppError> {
    let Some(header) = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        security_log!("WARN", "auth_missing", uri = uri.path());
        return Err(AppError::unauthorized());
    };

    let token = JwtService::extract_from_header(header)
        .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?;

    jwt.validate_token(token).map(CurrentUser::from).map_err(|e| {
        security_log!("WARN", "auth_failed", error = e.to_string(), uri = uri.path());
        match e {
            JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })
}

/// Reject staff routes without a valid token
///
/// CORS preflights, non-API paths (left to their normal 404) and public paths
/// pass through untouched.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();
    if req.method() == http::Method::OPTIONS || !path.starts_with("/api/") || is_public_path(path)
    {
        return Ok(next.run(req).await);
    }

    let user = authenticate(&state.jwt_service, req.headers(), req.uri())?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;
    use shared::error::ErrorCode;

    fn service() -> JwtService {
        JwtService::with_config(JwtConfig {
            secret: "middleware-test-secret-0123456789abcdef".into(),
            expiration_minutes: 5,
            issuer: "table-signal".into(),
            audience: "table-signal-staff".into(),
        })
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn public_paths() {
        assert!(is_public_path("/api/health"));
        assert!(is_public_path("/api/public/requests"));
        assert!(is_public_path("/api/public/bistro/tables/3"));
        assert!(!is_public_path("/api/requests"));
        assert!(!is_public_path("/api/publication"));
    }

    #[test]
    fn authenticate_outcomes() {
        let jwt = service();
        let uri: Uri = "/api/requests".parse().unwrap();

        let err = authenticate(&jwt, &HeaderMap::new(), &uri).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);

        let err = authenticate(&jwt, &headers("Basic abc"), &uri).unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);

        let token = jwt.generate_token("owner-9", "Kim", "owner").unwrap();
        let user = authenticate(&jwt, &headers(&format!("Bearer {token}")), &uri).unwrap();
        assert_eq!(user.id, "owner-9");
    }
}
