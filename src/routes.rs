//! 路由装配

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    response::Json,
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::app::{
    docs::{api_info, health_check, openapi_document, OPENAPI_PATH},
    goods::handler::{create_good, delete_good, get_good, list_goods, update_good},
    users::handler::{create_user, delete_user, get_user, list_users, update_user},
    AppState,
};
use crate::config::Config;
use crate::core::middleware::request_logging_middleware;

/// multipart 中除图片外的字段与分隔符所需的余量
const BODY_HEADROOM: usize = 1024 * 1024;

pub fn build_router(state: AppState, config: &Config) -> Router {
    let openapi = openapi_document(&config.uploads.public_prefix);
    let upload_prefix = config.uploads.public_prefix.trim_end_matches('/');

    Router::new()
        .route("/", get(api_info))
        .route("/health", get(health_check))
        .route(OPENAPI_PATH, get(move || async move { Json(openapi) }))
        .route("/goods", get(list_goods).post(create_good))
        .route(
            "/goods/:id",
            get(get_good).patch(update_good).delete(delete_good),
        )
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .nest_service(upload_prefix, ServeDir::new(&config.uploads.dir))
        .layer(DefaultBodyLimit::max(config.uploads.max_bytes + BODY_HEADROOM))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .with_state(state)
}
