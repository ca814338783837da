use axum::{
    extract::{FromRef, FromRequestParts, Path},
    http::request::Parts,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::Principal,
    config::AppConfig,
    error::AppError,
    models::{BusinessUnitId, Role},
    repository::RepositoryState,
};

#[derive(Deserialize)]
struct TenantPath {
    business_unit_id: BusinessUnitId,
}

/// TenantScope
///
/// The business unit an admin request operates on, resolved from the
/// `/{business_unit_id}/admin` path prefix and checked against the principal's
/// assignments. Every repository call under the admin router is keyed by
/// `business_unit_id` taken from here, never from a request body.
#[derive(Debug, Clone, PartialEq)]
pub struct TenantScope {
    pub business_unit_id: BusinessUnitId,
    pub role: Role,
    pub user_id: Uuid,
}

impl TenantScope {
    /// Content writes (catalog, FAQs, testimonials) need an owner or manager.
    pub fn require_content_manager(&self) -> Result<(), AppError> {
        if self.role.can_manage_content() {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

/// TenantScope Extractor
///
/// Rejects with 401 for anonymous requests and with 404 when the principal holds no
/// assignment for the unit in the path, so foreign unit ids are indistinguishable from
/// nonexistent ones.
impl<S> FromRequestParts<S> for TenantScope
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let principal = Principal::from_request_parts(parts, state).await?;

        let Path(TenantPath { business_unit_id }) =
            Path::<TenantPath>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::NotFound)?;

        let assignment = principal
            .assignment_for(&business_unit_id)
            .ok_or_else(|| {
                tracing::debug!(
                    user_id = %principal.user_id,
                    business_unit_id = %business_unit_id,
                    "no assignment for requested business unit"
                );
                AppError::NotFound
            })?;

        Ok(TenantScope {
            role: assignment.role,
            business_unit_id,
            user_id: principal.user_id,
        })
    }
}
