use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    error::AppError,
    handlers::{EntityPath, found, referenced},
    models::{CreateRoomRequest, CreateRoomTypeRequest, Room, RoomType, UpdateRoomRequest, UpdateRoomTypeRequest},
    tenant::TenantScope,
};

// --- Room Types ---

/// list_room_types
///
/// [Admin Route] Room types of the unit, oldest first.
#[utoipa::path(
    get,
    path = "/{business_unit_id}/admin/room-types",
    params(("business_unit_id" = String, Path, description = "Business unit id")),
    responses((status = 200, description = "Room types", body = [RoomType]))
)]
pub async fn list_room_types(
    scope: TenantScope,
    State(state): State<AppState>,
) -> Result<Json<Vec<RoomType>>, AppError> {
    Ok(Json(state.repo.list_room_types(&scope.business_unit_id).await?))
}

#[utoipa::path(
    get,
    path = "/{business_unit_id}/admin/room-types/{id}",
    params(
        ("business_unit_id" = String, Path, description = "Business unit id"),
        ("id" = Uuid, Path, description = "Room type id")
    ),
    responses(
        (status = 200, description = "Room type", body = RoomType),
        (status = 404, description = "Not found in this business unit")
    )
)]
pub async fn get_room_type(
    scope: TenantScope,
    State(state): State<AppState>,
    Path(EntityPath { id }): Path<EntityPath>,
) -> Result<Json<RoomType>, AppError> {
    let room_type = found(state.repo.get_room_type(&scope.business_unit_id, id).await?)?;
    Ok(Json(room_type))
}

/// create_room_type
///
/// [Admin Route, owner/manager] Adds a room type to the catalog.
#[utoipa::path(
    post,
    path = "/{business_unit_id}/admin/room-types",
    params(("business_unit_id" = String, Path, description = "Business unit id")),
    request_body = CreateRoomTypeRequest,
    responses(
        (status = 201, description = "Created", body = RoomType),
        (status = 403, description = "Role may not edit the catalog"),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn create_room_type(
    scope: TenantScope,
    State(state): State<AppState>,
    Json(payload): Json<CreateRoomTypeRequest>,
) -> Result<(StatusCode, Json<RoomType>), AppError> {
    scope.require_content_manager()?;

    let room_type = RoomType::new(scope.business_unit_id.clone(), payload);
    room_type.validate()?;
    let room_type = state.repo.insert_room_type(room_type).await?;

    tracing::info!(business_unit_id = %scope.business_unit_id, room_type_id = %room_type.id, "room type created");
    Ok((StatusCode::CREATED, Json(room_type)))
}

#[utoipa::path(
    put,
    path = "/{business_unit_id}/admin/room-types/{id}",
    params(
        ("business_unit_id" = String, Path, description = "Business unit id"),
        ("id" = Uuid, Path, description = "Room type id")
    ),
    request_body = UpdateRoomTypeRequest,
    responses(
        (status = 200, description = "Updated", body = RoomType),
        (status = 403, description = "Role may not edit the catalog"),
        (status = 404, description = "Not found in this business unit")
    )
)]
pub async fn update_room_type(
    scope: TenantScope,
    State(state): State<AppState>,
    Path(EntityPath { id }): Path<EntityPath>,
    Json(payload): Json<UpdateRoomTypeRequest>,
) -> Result<Json<RoomType>, AppError> {
    scope.require_content_manager()?;

    let mut room_type = found(state.repo.get_room_type(&scope.business_unit_id, id).await?)?;
    room_type.apply(payload);
    room_type.validate()?;
    Ok(Json(state.repo.save_room_type(room_type).await?))
}

/// delete_room_type
///
/// [Admin Route, owner/manager] Refused with 409 while rooms still use the type.
#[utoipa::path(
    delete,
    path = "/{business_unit_id}/admin/room-types/{id}",
    params(
        ("business_unit_id" = String, Path, description = "Business unit id"),
        ("id" = Uuid, Path, description = "Room type id")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found in this business unit"),
        (status = 409, description = "Room type in use")
    )
)]
pub async fn delete_room_type(
    scope: TenantScope,
    State(state): State<AppState>,
    Path(EntityPath { id }): Path<EntityPath>,
) -> Result<StatusCode, AppError> {
    scope.require_content_manager()?;
    state.repo.delete_room_type(&scope.business_unit_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Rooms ---

/// list_rooms
///
/// [Admin Route] Rooms of the unit, oldest first.
#[utoipa::path(
    get,
    path = "/{business_unit_id}/admin/rooms",
    params(("business_unit_id" = String, Path, description = "Business unit id")),
    responses((status = 200, description = "Rooms", body = [Room]))
)]
pub async fn list_rooms(
    scope: TenantScope,
    State(state): State<AppState>,
) -> Result<Json<Vec<Room>>, AppError> {
    Ok(Json(state.repo.list_rooms(&scope.business_unit_id).await?))
}

#[utoipa::path(
    get,
    path = "/{business_unit_id}/admin/rooms/{id}",
    params(
        ("business_unit_id" = String, Path, description = "Business unit id"),
        ("id" = Uuid, Path, description = "Room id")
    ),
    responses(
        (status = 200, description = "Room", body = Room),
        (status = 404, description = "Not found in this business unit")
    )
)]
pub async fn get_room(
    scope: TenantScope,
    State(state): State<AppState>,
    Path(EntityPath { id }): Path<EntityPath>,
) -> Result<Json<Room>, AppError> {
    Ok(Json(found(state.repo.get_room(&scope.business_unit_id, id).await?)?))
}

/// create_room
///
/// [Admin Route, owner/manager] The room type must belong to the same unit; a duplicate
/// room number is a 409.
#[utoipa::path(
    post,
    path = "/{business_unit_id}/admin/rooms",
    params(("business_unit_id" = String, Path, description = "Business unit id")),
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Created", body = Room),
        (status = 403, description = "Role may not edit the catalog"),
        (status = 409, description = "Room number already used"),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn create_room(
    scope: TenantScope,
    State(state): State<AppState>,
    Json(payload): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<Room>), AppError> {
    scope.require_content_manager()?;

    let room = Room::new(scope.business_unit_id.clone(), payload);
    room.validate()?;
    referenced(
        state.repo.get_room_type(&scope.business_unit_id, room.room_type_id).await?,
        "room_type_id",
    )?;
    let room = state.repo.insert_room(room).await?;

    tracing::info!(business_unit_id = %scope.business_unit_id, room_id = %room.id, number = %room.number, "room created");
    Ok((StatusCode::CREATED, Json(room)))
}

/// update_room
///
/// [Admin Route] Owners and managers may change any field. Staff may only change the
/// housekeeping `status`.
#[utoipa::path(
    put,
    path = "/{business_unit_id}/admin/rooms/{id}",
    params(
        ("business_unit_id" = String, Path, description = "Business unit id"),
        ("id" = Uuid, Path, description = "Room id")
    ),
    request_body = UpdateRoomRequest,
    responses(
        (status = 200, description = "Updated", body = Room),
        (status = 403, description = "Role may not edit these fields"),
        (status = 404, description = "Not found in this business unit"),
        (status = 409, description = "Room number already used")
    )
)]
pub async fn update_room(
    scope: TenantScope,
    State(state): State<AppState>,
    Path(EntityPath { id }): Path<EntityPath>,
    Json(payload): Json<UpdateRoomRequest>,
) -> Result<Json<Room>, AppError> {
    let status_only = payload.room_type_id.is_none() && payload.number.is_none() && payload.floor.is_none();
    if !status_only {
        scope.require_content_manager()?;
    }

    let mut room = found(state.repo.get_room(&scope.business_unit_id, id).await?)?;
    room.apply(payload);
    room.validate()?;
    referenced(
        state.repo.get_room_type(&scope.business_unit_id, room.room_type_id).await?,
        "room_type_id",
    )?;
    Ok(Json(state.repo.save_room(room).await?))
}

#[utoipa::path(
    delete,
    path = "/{business_unit_id}/admin/rooms/{id}",
    params(
        ("business_unit_id" = String, Path, description = "Business unit id"),
        ("id" = Uuid, Path, description = "Room id")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found in this business unit"),
        (status = 409, description = "Room has reservations")
    )
)]
pub async fn delete_room(
    scope: TenantScope,
    State(state): State<AppState>,
    Path(EntityPath { id }): Path<EntityPath>,
) -> Result<StatusCode, AppError> {
    scope.require_content_manager()?;
    state.repo.delete_room(&scope.business_unit_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
