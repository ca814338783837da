use crate::{
    AppState,
    handlers::{catalog, content, dashboard, front_desk, uploads},
};
use axum::{
    Router,
    routing::{get, post},
};

/// Admin Router Module
///
/// Mounted under `/{business_unit_id}/admin`. Every handler extracts a `TenantScope`,
/// which answers 404 unless the caller is assigned to the unit in the path. Role checks
/// for catalog and marketing writes happen inside the handlers.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /{bu}/admin
        .route("/", get(dashboard::get_dashboard))
        // GET /{bu}/admin/business-units
        // Business-unit switcher.
        .route("/business-units", get(dashboard::list_business_units))
        // --- Catalog ---
        .route(
            "/room-types",
            get(catalog::list_room_types).post(catalog::create_room_type),
        )
        .route(
            "/room-types/{id}",
            get(catalog::get_room_type)
                .put(catalog::update_room_type)
                .delete(catalog::delete_room_type),
        )
        .route("/rooms", get(catalog::list_rooms).post(catalog::create_room))
        .route(
            "/rooms/{id}",
            get(catalog::get_room)
                .put(catalog::update_room)
                .delete(catalog::delete_room),
        )
        // --- Front Desk ---
        .route(
            "/guests",
            get(front_desk::list_guests).post(front_desk::create_guest),
        )
        .route(
            "/guests/{id}",
            get(front_desk::get_guest)
                .put(front_desk::update_guest)
                .delete(front_desk::delete_guest),
        )
        // GET /{bu}/admin/reservations?status=...
        .route(
            "/reservations",
            get(front_desk::list_reservations).post(front_desk::create_reservation),
        )
        .route(
            "/reservations/{id}",
            get(front_desk::get_reservation)
                .put(front_desk::update_reservation)
                .delete(front_desk::delete_reservation),
        )
        // --- Marketing Content ---
        .route("/faqs", get(content::list_faqs).post(content::create_faq))
        .route(
            "/faqs/{id}",
            get(content::get_faq)
                .put(content::update_faq)
                .delete(content::delete_faq),
        )
        // GET /{bu}/admin/testimonials?published=...
        .route(
            "/testimonials",
            get(content::list_testimonials).post(content::create_testimonial),
        )
        .route(
            "/testimonials/{id}",
            get(content::get_testimonial)
                .put(content::update_testimonial)
                .delete(content::delete_testimonial),
        )
        // POST /{bu}/admin/uploads/presigned
        .route("/uploads/presigned", post(uploads::get_presigned_url))
}
