use crate::{AppState, handlers::session};
use axum::{Router, routing::get};

/// Auth-flow routes. Anonymous callers pass the access middleware here; signed-in callers
/// are redirected away before reaching a handler.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET/POST /auth/sign-in
        .route("/auth/sign-in", get(session::sign_in_page).post(session::sign_in))
}

/// Liveness probe for load balancers. Mounted outside the access middleware.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(|| async { "ok" }))
}
