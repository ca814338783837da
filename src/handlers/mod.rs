//! HTTP handlers, grouped by back-office area.
//!
//! Admin handlers take a [`TenantScope`](crate::tenant::TenantScope) as their first
//! extractor, so a request for a unit the caller is not assigned to is answered with 404
//! before any body is parsed.

use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, ValidationError};

pub mod catalog;
pub mod content;
pub mod dashboard;
pub mod front_desk;
pub mod session;
pub mod setup;
pub mod uploads;

/// EntityPath
///
/// The `{id}` segment of `/{business_unit_id}/admin/<collection>/{id}`. The unit segment
/// is read separately by the tenant extractor.
#[derive(Debug, Deserialize)]
pub struct EntityPath {
    pub id: Uuid,
}

/// Maps a scoped lookup miss onto 404.
pub(crate) fn found<T>(row: Option<T>) -> Result<T, AppError> {
    row.ok_or(AppError::NotFound)
}

/// A body field pointing at a row that does not exist in the caller's unit is a payload
/// error, not a missing resource.
pub(crate) fn referenced<T>(row: Option<T>, field: &str) -> Result<T, AppError> {
    row.ok_or_else(|| {
        ValidationError::new(format!("{field} does not exist in this business unit")).into()
    })
}
