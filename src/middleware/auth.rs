use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::{
    config::{AppConfig, token_ttl},
    dto::auth::Claims,
    error::{AppError, AppResult},
    state::AppState,
};

/// Identity attached to a request once its bearer token has been verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
}

/// Signs and verifies bearer tokens with the server-held secret.
#[derive(Clone)]
pub struct AuthKeys {
    secret: Option<Arc<str>>,
    ttl: TimeDelta,
}

impl AuthKeys {
    pub fn new(secret: Option<String>, ttl_hours: i64) -> anyhow::Result<Self> {
        Ok(Self {
            secret: secret.map(Arc::from),
            ttl: token_ttl(ttl_hours)?,
        })
    }

    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        Self::new(config.jwt_secret.clone(), config.jwt_ttl_hours)
    }

    fn secret(&self) -> AppResult<&[u8]> {
        self.secret
            .as_deref()
            .map(str::as_bytes)
            .ok_or_else(|| AppError::internal("JWT secret is not configured"))
    }

    pub fn issue(&self, user_id: Uuid) -> AppResult<String> {
        let secret = self.secret()?;
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::internal("Failed to set expiration"))?;

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .map_err(|e| AppError::internal(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> AppResult<AuthUser> {
        let secret = self.secret()?;
        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret),
            &Validation::default(),
        )
        .map_err(|_| AppError::Unauthorized("Invalid token".into()))?;

        let user_id = Uuid::parse_str(&decoded.claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid token".into()))?;

        Ok(AuthUser { user_id })
    }
}

fn bearer_token(headers: &HeaderMap) -> AppResult<&str> {
    let no_token = || AppError::Unauthorized("No token provided".into());
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(no_token)?
        .to_str()
        .map_err(|_| no_token())?;
    let token = value.strip_prefix("Bearer ").ok_or_else(no_token)?.trim();
    if token.is_empty() {
        return Err(no_token());
    }
    Ok(token)
}

/// Route-group middleware that rejects requests without a valid bearer token
/// and stores the caller's [`AuthUser`] in the request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = {
        let token = bearer_token(req.headers())?;
        state.auth.verify(token)?
    };
    tracing::debug!(user_id = %user.user_id, "authenticated");
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or_else(|| AppError::Unauthorized("No token provided".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn keys() -> AuthKeys {
        AuthKeys::new(Some("test-secret".into()), 1).unwrap()
    }

    #[test]
    fn issued_token_verifies_to_same_user() {
        let keys = keys();
        let user_id = Uuid::new_v4();
        let token = keys.issue(user_id).unwrap();
        assert_eq!(keys.verify(&token).unwrap().user_id, user_id);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = AuthKeys::new(Some("other".into()), 1)
            .unwrap()
            .issue(Uuid::new_v4())
            .unwrap();
        assert!(matches!(
            keys().verify(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: (Utc::now() - TimeDelta::hours(3)).timestamp() as usize,
            exp: (Utc::now() - TimeDelta::hours(2)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert!(matches!(
            keys().verify(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn missing_secret_is_internal() {
        let keys = AuthKeys::new(None, 1).unwrap();
        assert!(matches!(keys.verify("abc"), Err(AppError::Internal(_))));
        assert!(matches!(keys.issue(Uuid::new_v4()), Err(AppError::Internal(_))));
    }

    #[test]
    fn out_of_range_lifetime_is_rejected() {
        assert!(AuthKeys::new(Some("test-secret".into()), -1).is_err());
        assert!(AuthKeys::new(Some("test-secret".into()), i64::MAX).is_err());
    }

    #[test]
    fn bearer_token_requires_bearer_scheme() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_err());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(bearer_token(&headers).is_err());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers).unwrap(), "abc");
    }
}
