use axum::{
    Router,
    extract::FromRef,
    http::{HeaderName, StatusCode},
    middleware,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod access;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod repository;
pub mod storage;
pub mod tenant;

pub mod routes;
use routes::{admin, authenticated, public};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use memory::InMemoryRepository;
pub use repository::{PostgresRepository, RepositoryState};
pub use storage::{MockStorageService, S3StorageClient, StorageState};

/// ApiDoc
///
/// OpenAPI document served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::session::sign_in_page, handlers::session::sign_in, handlers::session::sign_out,
        handlers::session::root,
        handlers::setup::get_setup_status, handlers::setup::create_business_unit,
        handlers::dashboard::get_dashboard, handlers::dashboard::list_business_units,
        handlers::catalog::list_room_types, handlers::catalog::get_room_type,
        handlers::catalog::create_room_type, handlers::catalog::update_room_type,
        handlers::catalog::delete_room_type,
        handlers::catalog::list_rooms, handlers::catalog::get_room, handlers::catalog::create_room,
        handlers::catalog::update_room, handlers::catalog::delete_room,
        handlers::front_desk::list_guests, handlers::front_desk::get_guest,
        handlers::front_desk::create_guest, handlers::front_desk::update_guest,
        handlers::front_desk::delete_guest,
        handlers::front_desk::list_reservations, handlers::front_desk::get_reservation,
        handlers::front_desk::create_reservation, handlers::front_desk::update_reservation,
        handlers::front_desk::delete_reservation,
        handlers::content::list_faqs, handlers::content::get_faq, handlers::content::create_faq,
        handlers::content::update_faq, handlers::content::delete_faq,
        handlers::content::list_testimonials, handlers::content::get_testimonial,
        handlers::content::create_testimonial, handlers::content::update_testimonial,
        handlers::content::delete_testimonial,
        handlers::uploads::get_presigned_url,
    ),
    components(
        schemas(
            models::BusinessUnitId, models::Role, models::BusinessUnit, models::Assignment,
            models::RoomType, models::RoomStatus, models::Room, models::Guest,
            models::ReservationStatus, models::Reservation, models::Faq, models::Testimonial,
            models::SignInRequest, models::CreateBusinessUnitRequest,
            models::CreateRoomTypeRequest, models::UpdateRoomTypeRequest,
            models::CreateRoomRequest, models::UpdateRoomRequest,
            models::CreateGuestRequest, models::UpdateGuestRequest,
            models::CreateReservationRequest, models::UpdateReservationRequest,
            models::CreateFaqRequest, models::UpdateFaqRequest,
            models::CreateTestimonialRequest, models::UpdateTestimonialRequest,
            models::PresignedUrlRequest, models::PresignedUrlResponse,
            models::DashboardStats, models::DashboardResponse, models::BusinessUnitSummary,
            models::SetupStatus,
        )
    ),
    tags(
        (name = "hotel-admin", description = "Hotel back-office API")
    )
)]
struct ApiDoc;

/// AppState
///
/// Services shared by every request. Cloning is cheap: each field is an `Arc` or a small
/// config value.
#[derive(Clone)]
pub struct AppState {
    pub repo: RepositoryState,
    pub storage: StorageState,
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for StorageState {
    fn from_ref(app_state: &AppState) -> StorageState {
        app_state.storage.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the application. The access middleware wraps every route except `/health`,
/// including the API docs and the 404 fallback, so an anonymous request for any unknown
/// path is sent to sign-in as well.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let back_office = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(authenticated::authenticated_routes())
        .nest("/{business_unit_id}/admin", admin::admin_routes())
        .fallback(|| async { StatusCode::NOT_FOUND })
        .layer(middleware::from_fn_with_state(
            state.clone(),
            access::access_middleware,
        ));

    let base_router = Router::new()
        .merge(public::health_routes())
        .merge(back_office)
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span for one request, tagged with its `x-request-id` so every log line of the request
/// can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
