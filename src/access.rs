//! Business-unit access policy.
//!
//! Every request to the back office passes through [`decide`] before routing. The policy
//! reads only the per-request [`Session`] and the path; it owns no state and performs no
//! I/O, so concurrent requests never interact.
//!
//! | # | Condition                                               | Outcome                         |
//! |---|---------------------------------------------------------|---------------------------------|
//! | 1 | anonymous, path outside `/auth`                         | redirect `/auth/sign-in`        |
//! | 2 | signed in, path under `/auth`, has assignments          | redirect `/{first unit}/admin`  |
//! | 3 | signed in, path under `/auth`, no assignments           | redirect `/setup`               |
//! | 4 | anything else                                           | passthrough                     |
//!
//! [`decide_root`] is the companion rule for the bare `/` landing page.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    auth::{Session, resolve_session},
    models::BusinessUnitId,
};

pub const AUTH_PREFIX: &str = "/auth";
pub const SIGN_IN_PATH: &str = "/auth/sign-in";
pub const SETUP_PATH: &str = "/setup";
pub const ROOT_PATH: &str = "/";

/// Where a rejected request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectTarget {
    SignIn,
    BusinessUnitAdmin(BusinessUnitId),
    Setup,
}

impl RedirectTarget {
    /// The `Location` of this redirect.
    pub fn location(&self) -> String {
        match self {
            RedirectTarget::SignIn => SIGN_IN_PATH.to_string(),
            RedirectTarget::BusinessUnitAdmin(id) => admin_home(id),
            RedirectTarget::Setup => SETUP_PATH.to_string(),
        }
    }
}

impl IntoResponse for RedirectTarget {
    fn into_response(self) -> Response {
        see_other(&self.location())
    }
}

/// Outcome of the policy for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Passthrough,
    Redirect(RedirectTarget),
}

/// Landing page of a business unit's admin area.
pub fn admin_home(business_unit_id: &BusinessUnitId) -> String {
    format!("/{business_unit_id}/admin")
}

/// True when `path` is `/auth` itself or lies beneath it. Segment match: `/authors` and
/// `/x/auth/y` are not auth-flow paths.
pub fn is_auth_flow(path: &str) -> bool {
    match path.strip_prefix(AUTH_PREFIX) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// decide
///
/// The access rules, evaluated in order, first match wins.
pub fn decide(session: &Session, path: &str) -> Decision {
    let auth_flow = is_auth_flow(path);
    match session {
        Session::Unauthenticated if !auth_flow => Decision::Redirect(RedirectTarget::SignIn),
        Session::Authenticated(principal) if auth_flow => {
            match principal.default_business_unit() {
                Some(id) => Decision::Redirect(RedirectTarget::BusinessUnitAdmin(id.clone())),
                None => Decision::Redirect(RedirectTarget::Setup),
            }
        }
        _ => Decision::Passthrough,
    }
}

/// decide_root
///
/// A signed-in principal landing on exactly `/` with at least one assignment is sent to
/// the admin home of the first one. The target is never `/`, so the rule cannot loop.
pub fn decide_root(session: &Session, path: &str) -> Decision {
    if path != ROOT_PATH {
        return Decision::Passthrough;
    }
    match session.principal().and_then(|p| p.default_business_unit()) {
        Some(id) => Decision::Redirect(RedirectTarget::BusinessUnitAdmin(id.clone())),
        None => Decision::Passthrough,
    }
}

/// access_middleware
///
/// Resolves the session once, applies [`decide`], and either answers with a redirect or
/// forwards the request with the session attached to its extensions.
pub async fn access_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let session = resolve_session(request.headers(), &state.repo, &state.config).await;
    let path = request.uri().path();

    match decide(&session, path) {
        Decision::Redirect(target) => {
            tracing::debug!(path, location = %target.location(), "access redirect");
            target.into_response()
        }
        Decision::Passthrough => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
    }
}

/// 303 See Other, so form posts to a guarded path land on a GET of the target.
fn see_other(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::SEE_OTHER, [(header::LOCATION, value)]).into_response(),
        Err(_) => {
            tracing::error!(location, "redirect target is not a valid header value");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
