use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    AppState,
    error::AppError,
    handlers::{EntityPath, found},
    models::{
        CreateFaqRequest, CreateTestimonialRequest, Faq, Testimonial, UpdateFaqRequest,
        UpdateTestimonialRequest,
    },
    tenant::TenantScope,
};

/// TestimonialFilter
///
/// Query parameters of GET /{business_unit_id}/admin/testimonials.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct TestimonialFilter {
    /// `true` for the live ones, `false` for the moderation queue.
    pub published: Option<bool>,
}

// --- FAQs ---

/// list_faqs
///
/// [Admin Route] FAQs in display order.
#[utoipa::path(
    get,
    path = "/{business_unit_id}/admin/faqs",
    params(("business_unit_id" = String, Path, description = "Business unit id")),
    responses((status = 200, description = "FAQs", body = [Faq]))
)]
pub async fn list_faqs(
    scope: TenantScope,
    State(state): State<AppState>,
) -> Result<Json<Vec<Faq>>, AppError> {
    Ok(Json(state.repo.list_faqs(&scope.business_unit_id).await?))
}

#[utoipa::path(
    get,
    path = "/{business_unit_id}/admin/faqs/{id}",
    params(
        ("business_unit_id" = String, Path, description = "Business unit id"),
        ("id" = Uuid, Path, description = "FAQ id")
    ),
    responses(
        (status = 200, description = "FAQ", body = Faq),
        (status = 404, description = "Not found in this business unit")
    )
)]
pub async fn get_faq(
    scope: TenantScope,
    State(state): State<AppState>,
    Path(EntityPath { id }): Path<EntityPath>,
) -> Result<Json<Faq>, AppError> {
    Ok(Json(found(state.repo.get_faq(&scope.business_unit_id, id).await?)?))
}

#[utoipa::path(
    post,
    path = "/{business_unit_id}/admin/faqs",
    params(("business_unit_id" = String, Path, description = "Business unit id")),
    request_body = CreateFaqRequest,
    responses(
        (status = 201, description = "Created", body = Faq),
        (status = 403, description = "Role may not edit marketing content"),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn create_faq(
    scope: TenantScope,
    State(state): State<AppState>,
    Json(payload): Json<CreateFaqRequest>,
) -> Result<(StatusCode, Json<Faq>), AppError> {
    scope.require_content_manager()?;

    let faq = Faq::new(scope.business_unit_id.clone(), payload);
    faq.validate()?;
    Ok((StatusCode::CREATED, Json(state.repo.insert_faq(faq).await?)))
}

#[utoipa::path(
    put,
    path = "/{business_unit_id}/admin/faqs/{id}",
    params(
        ("business_unit_id" = String, Path, description = "Business unit id"),
        ("id" = Uuid, Path, description = "FAQ id")
    ),
    request_body = UpdateFaqRequest,
    responses(
        (status = 200, description = "Updated", body = Faq),
        (status = 403, description = "Role may not edit marketing content"),
        (status = 404, description = "Not found in this business unit")
    )
)]
pub async fn update_faq(
    scope: TenantScope,
    State(state): State<AppState>,
    Path(EntityPath { id }): Path<EntityPath>,
    Json(payload): Json<UpdateFaqRequest>,
) -> Result<Json<Faq>, AppError> {
    scope.require_content_manager()?;

    let mut faq = found(state.repo.get_faq(&scope.business_unit_id, id).await?)?;
    faq.apply(payload);
    faq.validate()?;
    Ok(Json(state.repo.save_faq(faq).await?))
}

#[utoipa::path(
    delete,
    path = "/{business_unit_id}/admin/faqs/{id}",
    params(
        ("business_unit_id" = String, Path, description = "Business unit id"),
        ("id" = Uuid, Path, description = "FAQ id")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Role may not edit marketing content"),
        (status = 404, description = "Not found in this business unit")
    )
)]
pub async fn delete_faq(
    scope: TenantScope,
    State(state): State<AppState>,
    Path(EntityPath { id }): Path<EntityPath>,
) -> Result<StatusCode, AppError> {
    scope.require_content_manager()?;
    state.repo.delete_faq(&scope.business_unit_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Testimonials ---

/// list_testimonials
///
/// [Admin Route] Newest first. `?published=false` is the moderation queue.
#[utoipa::path(
    get,
    path = "/{business_unit_id}/admin/testimonials",
    params(
        ("business_unit_id" = String, Path, description = "Business unit id"),
        TestimonialFilter
    ),
    responses((status = 200, description = "Testimonials", body = [Testimonial]))
)]
pub async fn list_testimonials(
    scope: TenantScope,
    State(state): State<AppState>,
    Query(filter): Query<TestimonialFilter>,
) -> Result<Json<Vec<Testimonial>>, AppError> {
    let testimonials = state
        .repo
        .list_testimonials(&scope.business_unit_id, filter.published)
        .await?;
    Ok(Json(testimonials))
}

#[utoipa::path(
    get,
    path = "/{business_unit_id}/admin/testimonials/{id}",
    params(
        ("business_unit_id" = String, Path, description = "Business unit id"),
        ("id" = Uuid, Path, description = "Testimonial id")
    ),
    responses(
        (status = 200, description = "Testimonial", body = Testimonial),
        (status = 404, description = "Not found in this business unit")
    )
)]
pub async fn get_testimonial(
    scope: TenantScope,
    State(state): State<AppState>,
    Path(EntityPath { id }): Path<EntityPath>,
) -> Result<Json<Testimonial>, AppError> {
    Ok(Json(found(state.repo.get_testimonial(&scope.business_unit_id, id).await?)?))
}

#[utoipa::path(
    post,
    path = "/{business_unit_id}/admin/testimonials",
    params(("business_unit_id" = String, Path, description = "Business unit id")),
    request_body = CreateTestimonialRequest,
    responses(
        (status = 201, description = "Created", body = Testimonial),
        (status = 403, description = "Role may not edit marketing content"),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn create_testimonial(
    scope: TenantScope,
    State(state): State<AppState>,
    Json(payload): Json<CreateTestimonialRequest>,
) -> Result<(StatusCode, Json<Testimonial>), AppError> {
    scope.require_content_manager()?;

    let testimonial = Testimonial::new(scope.business_unit_id.clone(), payload);
    testimonial.validate()?;
    let testimonial = state.repo.insert_testimonial(testimonial).await?;
    Ok((StatusCode::CREATED, Json(testimonial)))
}

/// update_testimonial
///
/// [Admin Route, owner/manager] Also used to publish or unpublish.
#[utoipa::path(
    put,
    path = "/{business_unit_id}/admin/testimonials/{id}",
    params(
        ("business_unit_id" = String, Path, description = "Business unit id"),
        ("id" = Uuid, Path, description = "Testimonial id")
    ),
    request_body = UpdateTestimonialRequest,
    responses(
        (status = 200, description = "Updated", body = Testimonial),
        (status = 403, description = "Role may not edit marketing content"),
        (status = 404, description = "Not found in this business unit"),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn update_testimonial(
    scope: TenantScope,
    State(state): State<AppState>,
    Path(EntityPath { id }): Path<EntityPath>,
    Json(payload): Json<UpdateTestimonialRequest>,
) -> Result<Json<Testimonial>, AppError> {
    scope.require_content_manager()?;

    let mut testimonial = found(state.repo.get_testimonial(&scope.business_unit_id, id).await?)?;
    let was_published = testimonial.is_published;
    testimonial.apply(payload);
    testimonial.validate()?;
    let testimonial = state.repo.save_testimonial(testimonial).await?;

    if testimonial.is_published != was_published {
        tracing::info!(
            business_unit_id = %scope.business_unit_id,
            testimonial_id = %testimonial.id,
            published = testimonial.is_published,
            "testimonial visibility changed"
        );
    }
    Ok(Json(testimonial))
}

#[utoipa::path(
    delete,
    path = "/{business_unit_id}/admin/testimonials/{id}",
    params(
        ("business_unit_id" = String, Path, description = "Business unit id"),
        ("id" = Uuid, Path, description = "Testimonial id")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Role may not edit marketing content"),
        (status = 404, description = "Not found in this business unit")
    )
)]
pub async fn delete_testimonial(
    scope: TenantScope,
    State(state): State<AppState>,
    Path(EntityPath { id }): Path<EntityPath>,
) -> Result<StatusCode, AppError> {
    scope.require_content_manager()?;
    state.repo.delete_testimonial(&scope.business_unit_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
