use std::ffi::OsStr;

use axum::{Json, extract::State};
use uuid::Uuid;

use crate::{
    AppState,
    error::{AppError, ValidationError},
    models::{BusinessUnitId, PresignedUrlRequest, PresignedUrlResponse},
    tenant::TenantScope,
};

/// get_presigned_url
///
/// [Admin Route] Issues a short-lived PUT URL so room and marketing images go straight to
/// object storage. The key lives under the unit's own prefix and is never derived from
/// the client filename beyond its extension.
#[utoipa::path(
    post,
    path = "/{business_unit_id}/admin/uploads/presigned",
    params(("business_unit_id" = String, Path, description = "Business unit id")),
    request_body = PresignedUrlRequest,
    responses(
        (status = 200, description = "URL", body = PresignedUrlResponse),
        (status = 422, description = "Not an image content type"),
        (status = 502, description = "Object storage unavailable")
    )
)]
pub async fn get_presigned_url(
    scope: TenantScope,
    State(state): State<AppState>,
    Json(payload): Json<PresignedUrlRequest>,
) -> Result<Json<PresignedUrlResponse>, AppError> {
    if !payload.file_type.starts_with("image/") {
        return Err(ValidationError::new("file_type must be an image/* content type").into());
    }

    let object_key = upload_key(&scope.business_unit_id, &payload.filename, Uuid::new_v4());
    let upload_url = state
        .storage
        .get_presigned_upload_url(&object_key, &payload.file_type)
        .await?;

    Ok(Json(PresignedUrlResponse {
        upload_url,
        resource_key: object_key,
    }))
}

/// `{business_unit_id}/uploads/{uuid}.{ext}`, with `bin` for names without a usable
/// extension.
fn upload_key(business_unit_id: &BusinessUnitId, filename: &str, id: Uuid) -> String {
    let extension = std::path::Path::new(filename)
        .extension()
        .and_then(OsStr::to_str)
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| "bin".to_string());
    format!("{business_unit_id}/uploads/{id}.{extension}")
}
