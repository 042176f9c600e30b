use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::handlers::{pages, protected, public};
use crate::middleware::{jwt_auth_middleware, page_gatekeeper};
use crate::services::{Department, Designation, EmployeeType, Location};

/// Shared by every handler; cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let max_body = state.config.api.max_request_size_bytes;
    let cors = cors_layer(&state.config);

    let mut app = Router::new()
        .merge(public_routes())
        .merge(page_routes(state.clone()))
        .merge(api_routes(state.clone()))
        .layer(DefaultBodyLimit::max(max_body));

    if let Some(cors) = cors {
        app = app.layer(cors);
    }
    if state.config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    app.with_state(state)
}

fn public_routes() -> Router<AppState> {
    use public::{health, pages, session};

    Router::new()
        .route("/health", get(health::health))
        .route("/signin", get(pages::signin_page))
        .route("/unauthorized", get(pages::unauthorized_page))
        .route("/api/auth/signin", post(session::signin))
        .route("/api/auth/signout", post(session::signout))
}

fn page_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(pages::dashboard))
        .route("/user", get(pages::user_assets))
        .route("/user/*rest", get(pages::user_assets))
        .route_layer(from_fn_with_state(state, page_gatekeeper))
}

fn api_routes(state: AppState) -> Router<AppState> {
    use protected::*;

    Router::new()
        .route("/api/auth/me", get(session::me))
        .route(
            "/api/departments",
            get(lookups::list::<Department>)
                .post(lookups::create::<Department>)
                .patch(lookups::update::<Department>),
        )
        .route(
            "/api/designations",
            get(lookups::list::<Designation>)
                .post(lookups::create::<Designation>)
                .patch(lookups::update::<Designation>),
        )
        .route(
            "/api/employee-types",
            get(lookups::list::<EmployeeType>)
                .post(lookups::create::<EmployeeType>)
                .patch(lookups::update::<EmployeeType>),
        )
        .route(
            "/api/locations",
            get(lookups::list::<Location>)
                .post(lookups::create::<Location>)
                .patch(lookups::update::<Location>),
        )
        .route(
            "/api/contracts",
            get(contracts::list).post(contracts::create).patch(contracts::update),
        )
        .route(
            "/api/spares",
            get(spares::list).post(spares::create).patch(spares::update),
        )
        .route(
            "/api/asset-category",
            get(categories::list).post(categories::create).patch(categories::update),
        )
        .route("/api/asset-category/search", get(categories::search))
        .route(
            "/api/asset",
            get(assets::list).post(assets::create).patch(assets::update),
        )
        .route("/api/asset/search", get(assets::search))
        .route(
            "/api/inventory",
            get(inventory::list).post(inventory::create).patch(inventory::update),
        )
        .route(
            "/api/employees",
            get(employees::list).post(employees::create).patch(employees::update),
        )
        .route(
            "/api/users",
            get(users::list).post(users::create).patch(users::update),
        )
        .route("/api/users/search", get(users::search))
        .route(
            "/api/asset-assignment",
            get(assignments::list)
                .post(assignments::create)
                .patch(assignments::return_asset),
        )
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> Option<CorsLayer> {
    if !config.security.enable_cors {
        return None;
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    // Credentialed CORS cannot use a wildcard origin
    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::PATCH])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true),
    )
}
