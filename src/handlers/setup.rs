use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::{
    AppState,
    access::RedirectTarget,
    auth::Principal,
    error::{AppError, ValidationError},
    models::{Assignment, BusinessUnit, BusinessUnitId, CreateBusinessUnitRequest, Role, SetupStatus},
};

/// get_setup_status
///
/// [Authenticated Route] Where a user without a business unit lands after sign-in.
#[utoipa::path(
    get,
    path = "/setup",
    responses((status = 200, description = "Setup status", body = SetupStatus))
)]
pub async fn get_setup_status(principal: Principal) -> Json<SetupStatus> {
    Json(SetupStatus {
        user_id: principal.user_id,
        assignment_count: principal.assignments.len(),
        default_business_unit: principal.default_business_unit().cloned(),
        email: principal.email,
    })
}

/// create_business_unit
///
/// [Authenticated Route] Creates a business unit with the caller as its owner, then
/// redirects into the new unit's admin area.
#[utoipa::path(
    post,
    path = "/setup",
    request_body = CreateBusinessUnitRequest,
    responses(
        (status = 303, description = "Created, redirect to /{business_unit_id}/admin"),
        (status = 422, description = "Name missing")
    )
)]
pub async fn create_business_unit(
    principal: Principal,
    State(state): State<AppState>,
    Json(payload): Json<CreateBusinessUnitRequest>,
) -> Result<Response, AppError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ValidationError::new("name must not be empty").into());
    }

    let unit = BusinessUnit {
        id: BusinessUnitId::generate(),
        name: name.to_string(),
        created_at: Utc::now(),
    };
    let owner = Assignment::new(principal.user_id, unit.id.clone(), Role::Owner);
    let created = state.repo.create_business_unit(unit, owner).await?;

    tracing::info!(
        user_id = %principal.user_id,
        business_unit_id = %created.id,
        "business unit created"
    );
    Ok(RedirectTarget::BusinessUnitAdmin(created.id).into_response())
}
