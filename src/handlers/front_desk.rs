use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    AppState,
    error::AppError,
    handlers::{EntityPath, found, referenced},
    models::{
        CreateGuestRequest, CreateReservationRequest, Guest, Reservation, ReservationStatus,
        UpdateGuestRequest, UpdateReservationRequest,
    },
    tenant::TenantScope,
};

/// ReservationFilter
///
/// Query parameters of GET /{business_unit_id}/admin/reservations.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ReservationFilter {
    /// Only reservations in this state.
    pub status: Option<ReservationStatus>,
}

// --- Guests ---

#[utoipa::path(
    get,
    path = "/{business_unit_id}/admin/guests",
    params(("business_unit_id" = String, Path, description = "Business unit id")),
    responses((status = 200, description = "Guests", body = [Guest]))
)]
pub async fn list_guests(
    scope: TenantScope,
    State(state): State<AppState>,
) -> Result<Json<Vec<Guest>>, AppError> {
    Ok(Json(state.repo.list_guests(&scope.business_unit_id).await?))
}

#[utoipa::path(
    get,
    path = "/{business_unit_id}/admin/guests/{id}",
    params(
        ("business_unit_id" = String, Path, description = "Business unit id"),
        ("id" = Uuid, Path, description = "Guest id")
    ),
    responses(
        (status = 200, description = "Guest", body = Guest),
        (status = 404, description = "Not found in this business unit")
    )
)]
pub async fn get_guest(
    scope: TenantScope,
    State(state): State<AppState>,
    Path(EntityPath { id }): Path<EntityPath>,
) -> Result<Json<Guest>, AppError> {
    Ok(Json(found(state.repo.get_guest(&scope.business_unit_id, id).await?)?))
}

#[utoipa::path(
    post,
    path = "/{business_unit_id}/admin/guests",
    params(("business_unit_id" = String, Path, description = "Business unit id")),
    request_body = CreateGuestRequest,
    responses(
        (status = 201, description = "Created", body = Guest),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn create_guest(
    scope: TenantScope,
    State(state): State<AppState>,
    Json(payload): Json<CreateGuestRequest>,
) -> Result<(StatusCode, Json<Guest>), AppError> {
    let guest = Guest::new(scope.business_unit_id.clone(), payload);
    guest.validate()?;
    let guest = state.repo.insert_guest(guest).await?;
    Ok((StatusCode::CREATED, Json(guest)))
}

#[utoipa::path(
    put,
    path = "/{business_unit_id}/admin/guests/{id}",
    params(
        ("business_unit_id" = String, Path, description = "Business unit id"),
        ("id" = Uuid, Path, description = "Guest id")
    ),
    request_body = UpdateGuestRequest,
    responses(
        (status = 200, description = "Updated", body = Guest),
        (status = 404, description = "Not found in this business unit"),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn update_guest(
    scope: TenantScope,
    State(state): State<AppState>,
    Path(EntityPath { id }): Path<EntityPath>,
    Json(payload): Json<UpdateGuestRequest>,
) -> Result<Json<Guest>, AppError> {
    let mut guest = found(state.repo.get_guest(&scope.business_unit_id, id).await?)?;
    guest.apply(payload);
    guest.validate()?;
    Ok(Json(state.repo.save_guest(guest).await?))
}

/// delete_guest
///
/// [Admin Route] Refused with 409 while the guest has reservations.
#[utoipa::path(
    delete,
    path = "/{business_unit_id}/admin/guests/{id}",
    params(
        ("business_unit_id" = String, Path, description = "Business unit id"),
        ("id" = Uuid, Path, description = "Guest id")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found in this business unit"),
        (status = 409, description = "Guest has reservations")
    )
)]
pub async fn delete_guest(
    scope: TenantScope,
    State(state): State<AppState>,
    Path(EntityPath { id }): Path<EntityPath>,
) -> Result<StatusCode, AppError> {
    state.repo.delete_guest(&scope.business_unit_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Reservations ---

/// list_reservations
///
/// [Admin Route] Reservations of the unit by check-in date, optionally filtered by status.
#[utoipa::path(
    get,
    path = "/{business_unit_id}/admin/reservations",
    params(
        ("business_unit_id" = String, Path, description = "Business unit id"),
        ReservationFilter
    ),
    responses((status = 200, description = "Reservations", body = [Reservation]))
)]
pub async fn list_reservations(
    scope: TenantScope,
    State(state): State<AppState>,
    Query(filter): Query<ReservationFilter>,
) -> Result<Json<Vec<Reservation>>, AppError> {
    let reservations = state
        .repo
        .list_reservations(&scope.business_unit_id, filter.status)
        .await?;
    Ok(Json(reservations))
}

#[utoipa::path(
    get,
    path = "/{business_unit_id}/admin/reservations/{id}",
    params(
        ("business_unit_id" = String, Path, description = "Business unit id"),
        ("id" = Uuid, Path, description = "Reservation id")
    ),
    responses(
        (status = 200, description = "Reservation", body = Reservation),
        (status = 404, description = "Not found in this business unit")
    )
)]
pub async fn get_reservation(
    scope: TenantScope,
    State(state): State<AppState>,
    Path(EntityPath { id }): Path<EntityPath>,
) -> Result<Json<Reservation>, AppError> {
    Ok(Json(found(state.repo.get_reservation(&scope.business_unit_id, id).await?)?))
}

/// create_reservation
///
/// [Admin Route] Books a room for a guest. Room and guest must belong to the unit and the
/// nights must not collide with another live reservation of the room.
#[utoipa::path(
    post,
    path = "/{business_unit_id}/admin/reservations",
    params(("business_unit_id" = String, Path, description = "Business unit id")),
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Created", body = Reservation),
        (status = 409, description = "Room already booked for some of these nights"),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn create_reservation(
    scope: TenantScope,
    State(state): State<AppState>,
    Json(payload): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<Reservation>), AppError> {
    let reservation = Reservation::new(scope.business_unit_id.clone(), payload);
    check_reservation(&state, &reservation, None).await?;
    let reservation = state.repo.insert_reservation(reservation).await?;

    tracing::info!(
        business_unit_id = %scope.business_unit_id,
        reservation_id = %reservation.id,
        room_id = %reservation.room_id,
        "reservation created"
    );
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// update_reservation
///
/// [Admin Route] Partial update, including status transitions. Cancelling always succeeds;
/// moving dates or rooms is re-checked for overlap.
#[utoipa::path(
    put,
    path = "/{business_unit_id}/admin/reservations/{id}",
    params(
        ("business_unit_id" = String, Path, description = "Business unit id"),
        ("id" = Uuid, Path, description = "Reservation id")
    ),
    request_body = UpdateReservationRequest,
    responses(
        (status = 200, description = "Updated", body = Reservation),
        (status = 404, description = "Not found in this business unit"),
        (status = 409, description = "Room already booked for some of these nights"),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn update_reservation(
    scope: TenantScope,
    State(state): State<AppState>,
    Path(EntityPath { id }): Path<EntityPath>,
    Json(payload): Json<UpdateReservationRequest>,
) -> Result<Json<Reservation>, AppError> {
    let mut reservation = found(state.repo.get_reservation(&scope.business_unit_id, id).await?)?;
    reservation.apply(payload);
    check_reservation(&state, &reservation, Some(reservation.id)).await?;
    Ok(Json(state.repo.save_reservation(reservation).await?))
}

#[utoipa::path(
    delete,
    path = "/{business_unit_id}/admin/reservations/{id}",
    params(
        ("business_unit_id" = String, Path, description = "Business unit id"),
        ("id" = Uuid, Path, description = "Reservation id")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found in this business unit")
    )
)]
pub async fn delete_reservation(
    scope: TenantScope,
    State(state): State<AppState>,
    Path(EntityPath { id }): Path<EntityPath>,
) -> Result<StatusCode, AppError> {
    state.repo.delete_reservation(&scope.business_unit_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Field rules, references and the overlap rule. The schema enforces overlap again on
/// write, which closes the race between this check and the insert.
async fn check_reservation(
    state: &AppState,
    reservation: &Reservation,
    exclude: Option<uuid::Uuid>,
) -> Result<(), AppError> {
    reservation.validate()?;

    let bu = &reservation.business_unit_id;
    referenced(state.repo.get_room(bu, reservation.room_id).await?, "room_id")?;
    referenced(state.repo.get_guest(bu, reservation.guest_id).await?, "guest_id")?;

    if !reservation.status.holds_room() {
        return Ok(());
    }
    let overlapping = state
        .repo
        .find_overlapping_reservation(
            bu,
            reservation.room_id,
            reservation.check_in,
            reservation.check_out,
            exclude,
        )
        .await?;
    if let Some(other) = overlapping {
        return Err(AppError::Conflict(format!(
            "room is already booked by reservation {other} for some of these nights"
        )));
    }
    Ok(())
}
