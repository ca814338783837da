use crate::{
    AppState,
    handlers::{session, setup},
};
use axum::{
    Router,
    routing::{get, post},
};

/// Routes for a signed-in principal that do not need a tenant scope.
pub fn authenticated_routes() -> Router<AppState> {
    Router::new()
        // GET /
        // Lands on the default business unit, or on setup when there is none.
        .route("/", get(session::root))
        // GET/POST /setup
        // First-run flow: creates a business unit owned by the caller.
        .route("/setup", get(setup::get_setup_status).post(setup::create_business_unit))
        .route("/sign-out", post(session::sign_out))
}
