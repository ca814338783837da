//! Router modules, one per access tier.
//!
//! Everything except `/health` and the API docs sits behind the access middleware; the
//! tiers differ only in what their handlers extract.

/// Anonymous-reachable routes: the `/auth` flow and the health probe.
pub mod public;

/// Routes for any signed-in principal, with or without a business unit.
pub mod authenticated;

/// Tenant-scoped routes nested under `/{business_unit_id}/admin`.
pub mod admin;
