use axum::body::Body;
use axum::http::{HeaderValue, Method};
use axum::{Json, Router, middleware, routing::get};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_governor::GovernorLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use registrar_config::RateLimitConfig;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::role::require_admin;
use crate::modules::admin::router::init_admin_router;
use crate::modules::attendance::router::init_attendance_router;
use crate::modules::auth::router::init_auth_router;
use crate::modules::courses::router::init_courses_router;
use crate::modules::departments::router::init_departments_router;
use crate::modules::exams::router::init_exams_router;
use crate::modules::faculty::router::init_faculty_router;
use crate::modules::grades::router::init_grades_router;
use crate::modules::registrations::router::init_registrations_router;
use crate::modules::students::router::init_students_router;
use crate::state::AppState;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true)
}

/// The full application without rate limiting.
pub fn init_router(state: AppState) -> Router {
    build_router(state, false)
}

/// The full application with per-IP rate limits: a general limit on `/api`
/// and a stricter one on `/api/auth`.
///
/// The limiter keys on the peer address, so the router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn init_router_with_rate_limits(state: AppState) -> Router {
    build_router(state, true)
}

fn build_router(state: AppState, rate_limited: bool) -> Router {
    let limits = rate_limited.then_some(&state.rate_limit_config);

    let mut auth_router = init_auth_router();
    if let Some(config) = limits.and_then(RateLimitConfig::auth_governor_config) {
        auth_router = auth_router.layer(GovernorLayer::<_, _, Body>::new(config));
    }

    let mut api = Router::new()
        .nest("/auth", auth_router)
        .nest(
            "/admin",
            init_admin_router()
                .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
        )
        .nest("/departments", init_departments_router())
        .nest("/faculty", init_faculty_router())
        .nest("/students", init_students_router())
        .nest("/courses", init_courses_router())
        .nest("/exams", init_exams_router())
        .nest("/grades", init_grades_router())
        .nest("/attendance", init_attendance_router())
        .nest("/registrations", init_registrations_router());

    if let Some(config) = limits.and_then(RateLimitConfig::general_governor_config) {
        api = api.layer(GovernorLayer::<_, _, Body>::new(config));
    }

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
