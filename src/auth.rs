use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    config::{AppConfig, Env},
    error::{AppError, RepoError},
    models::{Assignment, BusinessUnitId},
    repository::RepositoryState,
};

/// Name of the cookie carrying the session JWT.
pub const SESSION_COOKIE: &str = "__session";

/// Local-only header that authenticates as an existing profile id without a token.
pub const DEV_USER_HEADER: &str = "x-user-id";

/// Claims
///
/// Payload of the JWT issued by the identity provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the profile id of the user.
    pub sub: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: usize,
    pub iat: usize,
}

/// Principal
///
/// The authenticated identity of a request together with its business-unit assignments,
/// in the order the identity layer returned them.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
    pub assignments: Vec<Assignment>,
}

impl Principal {
    /// The default tenant: the first assignment in list order. Duplicates are not
    /// collapsed, so the first occurrence always wins.
    pub fn default_business_unit(&self) -> Option<&BusinessUnitId> {
        self.assignments.first().map(|a| &a.business_unit_id)
    }

    /// The first assignment granting access to `business_unit_id`, if any.
    pub fn assignment_for(&self, business_unit_id: &BusinessUnitId) -> Option<&Assignment> {
        self.assignments
            .iter()
            .find(|a| &a.business_unit_id == business_unit_id)
    }
}

/// Session
///
/// Per-request authentication state. Resolved once by the access middleware and stored in
/// the request extensions; handlers read it back through the extractor below.
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    Unauthenticated,
    Authenticated(Principal),
}

impl Session {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Session::Authenticated(principal) => Some(principal),
            Session::Unauthenticated => None,
        }
    }
}

/// Why a request could not be authenticated. Never surfaced to the client; the request is
/// simply treated as anonymous.
#[derive(Debug, Error)]
enum AuthFailure {
    #[error("no credentials presented")]
    MissingCredentials,
    #[error("token rejected: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
    #[error("token subject has no profile")]
    UnknownUser,
    #[error("identity lookup failed: {0}")]
    Lookup(#[from] RepoError),
}

/// decode_token
///
/// Validates the JWT signature and expiry with the configured shared secret.
pub fn decode_token(token: &str, config: &AppConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    let mut validation = Validation::default();
    validation.validate_exp = true;
    // Provider tokens carry an `aud` we do not pin.
    validation.validate_aud = false;
    decode::<Claims>(token, &decoding_key, &validation).map(|data| data.claims)
}

/// resolve_session
///
/// Turns the request credentials into a `Session`. Fail-closed: every failure (missing or
/// malformed token, unknown user, lookup error) yields `Session::Unauthenticated`.
pub async fn resolve_session(headers: &HeaderMap, repo: &RepositoryState, config: &AppConfig) -> Session {
    match authenticate(headers, repo, config).await {
        Ok(principal) => Session::Authenticated(principal),
        Err(AuthFailure::MissingCredentials) => Session::Unauthenticated,
        Err(AuthFailure::Lookup(e)) => {
            tracing::error!(error = %e, "session lookup failed, treating request as anonymous");
            Session::Unauthenticated
        }
        Err(reason) => {
            tracing::debug!(%reason, "session rejected");
            Session::Unauthenticated
        }
    }
}

async fn authenticate(
    headers: &HeaderMap,
    repo: &RepositoryState,
    config: &AppConfig,
) -> Result<Principal, AuthFailure> {
    let user_id = match dev_bypass_user(headers, config) {
        Some(user_id) => user_id,
        None => {
            let token = bearer_token(headers)
                .or_else(|| session_cookie(headers))
                .ok_or(AuthFailure::MissingCredentials)?;
            decode_token(token, config)?.sub
        }
    };

    // The profile must still exist: deleting it revokes outstanding tokens.
    let user = repo.get_user(user_id).await?.ok_or(AuthFailure::UnknownUser)?;
    let assignments = repo.list_assignments(user.id).await?;

    Ok(Principal {
        user_id: user.id,
        email: user.email,
        assignments,
    })
}

/// Outside production a raw profile id in `x-user-id` stands in for a token.
fn dev_bypass_user(headers: &HeaderMap, config: &AppConfig) -> Option<Uuid> {
    if !config.dev_bypass_enabled() {
        return None;
    }
    headers
        .get(DEV_USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok())
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// session_cookie
///
/// Finds the `__session` value across every `Cookie` header of the request.
pub fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value)
}

/// Builds the `Set-Cookie` value that stores a session token.
pub fn session_cookie_header(token: &str, config: &AppConfig) -> String {
    let secure = if config.env == Env::Production { "; Secure" } else { "" };
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax{secure}")
}

/// Builds the `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie_header() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Session Extractor
///
/// Reuses the session the access middleware stored in the request extensions and only
/// resolves it from credentials when the middleware did not run (e.g. handler tests).
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<Session>() {
            return Ok(session.clone());
        }
        let repo = RepositoryState::from_ref(state);
        let config = AppConfig::from_ref(state);
        let session = resolve_session(&parts.headers, &repo, &config).await;
        parts.extensions.insert(session.clone());
        Ok(session)
    }
}

/// Principal Extractor
///
/// For handlers that only make sense for a signed-in user. Rejects with 401.
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(session) = Session::from_request_parts(parts, state).await;
        match session {
            Session::Authenticated(principal) => Ok(principal),
            Session::Unauthenticated => Err(AppError::Unauthorized),
        }
    }
}
