use axum::{
    Json,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::{
    AppState,
    access::{Decision, RedirectTarget, ROOT_PATH, decide_root},
    auth::{Session, clear_session_cookie_header, decode_token, session_cookie_header},
    error::{AppError, ValidationError},
    models::{SignInRequest, User},
};

/// sign_in_page
///
/// [Auth Flow] Describes how to obtain a session. Reachable only while signed out; a
/// signed-in caller is redirected before this runs.
#[utoipa::path(
    get,
    path = "/auth/sign-in",
    responses((status = 200, description = "Sign-in contract"))
)]
pub async fn sign_in_page() -> Json<Value> {
    Json(json!({
        "method": "POST",
        "path": "/auth/sign-in",
        "body": { "token": "<identity provider JWT>" },
    }))
}

/// sign_in
///
/// [Auth Flow] Exchanges an identity-provider JWT for the `__session` cookie and sends the
/// browser to `/`, where the root rule picks the landing page.
///
/// The local profile mirror is created or refreshed here, so a user exists before any
/// request authenticates with the cookie.
#[utoipa::path(
    post,
    path = "/auth/sign-in",
    request_body = SignInRequest,
    responses(
        (status = 303, description = "Signed in, redirect to /"),
        (status = 401, description = "Invalid or expired token"),
        (status = 422, description = "Token carries no email for a new profile")
    )
)]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(payload): Json<SignInRequest>,
) -> Result<Response, AppError> {
    let claims = decode_token(payload.token.trim(), &state.config).map_err(|e| {
        tracing::debug!(error = %e, "sign-in token rejected");
        AppError::Unauthorized
    })?;

    let email = match claims.email {
        Some(email) => email,
        None => state
            .repo
            .get_user(claims.sub)
            .await?
            .map(|user| user.email)
            .ok_or_else(|| ValidationError::new("token carries no email claim"))?,
    };

    let user = state
        .repo
        .upsert_user(User {
            id: claims.sub,
            email,
        })
        .await?;
    tracing::info!(user_id = %user.id, "user signed in");

    let cookie = HeaderValue::from_str(&session_cookie_header(payload.token.trim(), &state.config))
        .map_err(|_| AppError::Unauthorized)?;

    Ok((
        StatusCode::SEE_OTHER,
        [
            (header::SET_COOKIE, cookie),
            (header::LOCATION, HeaderValue::from_static(ROOT_PATH)),
        ],
    )
        .into_response())
}

/// sign_out
///
/// Drops the session cookie and returns to the sign-in page.
#[utoipa::path(
    post,
    path = "/sign-out",
    responses((status = 303, description = "Signed out, redirect to /auth/sign-in"))
)]
pub async fn sign_out() -> Response {
    let mut response = RedirectTarget::SignIn.into_response();
    if let Ok(cookie) = HeaderValue::from_str(&clear_session_cookie_header()) {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    response
}

/// root
///
/// `/` has no page of its own: signed-in users land on their default unit's admin home,
/// or on setup when they have no unit yet.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 303, description = "Redirect to the default admin home or /setup"))
)]
pub async fn root(session: Session) -> Response {
    match decide_root(&session, ROOT_PATH) {
        Decision::Redirect(target) => target.into_response(),
        Decision::Passthrough => match session {
            Session::Authenticated(_) => RedirectTarget::Setup.into_response(),
            Session::Unauthenticated => RedirectTarget::SignIn.into_response(),
        },
    }
}
