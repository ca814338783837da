use axum::{Json, extract::State};

use crate::{
    AppState,
    auth::Principal,
    error::AppError,
    handlers::found,
    models::{BusinessUnitSummary, DashboardResponse},
    tenant::TenantScope,
};

/// get_dashboard
///
/// [Admin Route] Admin home of a business unit: the unit, the caller's role in it and the
/// sidebar badge counters.
#[utoipa::path(
    get,
    path = "/{business_unit_id}/admin",
    params(("business_unit_id" = String, Path, description = "Business unit id")),
    responses(
        (status = 200, description = "Dashboard", body = DashboardResponse),
        (status = 404, description = "Not assigned to this business unit")
    )
)]
pub async fn get_dashboard(
    scope: TenantScope,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let business_unit = found(state.repo.get_business_unit(&scope.business_unit_id).await?)?;
    let badges = state.repo.get_dashboard_stats(&scope.business_unit_id).await?;

    Ok(Json(DashboardResponse {
        business_unit,
        role: scope.role,
        badges,
    }))
}

/// list_business_units
///
/// [Admin Route] Entries of the business-unit switcher, in assignment order.
#[utoipa::path(
    get,
    path = "/{business_unit_id}/admin/business-units",
    params(("business_unit_id" = String, Path, description = "Business unit id")),
    responses((status = 200, description = "Assigned business units", body = [BusinessUnitSummary]))
)]
pub async fn list_business_units(
    scope: TenantScope,
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<Vec<BusinessUnitSummary>>, AppError> {
    let mut units = Vec::with_capacity(principal.assignments.len());
    for assignment in &principal.assignments {
        // An assignment whose unit vanished mid-request is skipped rather than failing the list.
        let Some(unit) = state.repo.get_business_unit(&assignment.business_unit_id).await? else {
            continue;
        };
        units.push(BusinessUnitSummary {
            is_current: unit.id == scope.business_unit_id,
            id: unit.id,
            name: unit.name,
            role: assignment.role,
        });
    }
    Ok(Json(units))
}
