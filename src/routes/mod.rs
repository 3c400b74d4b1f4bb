use crate::config::AppState;
use axum::http::Method;
use axum::{middleware, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::rate_limiter::rate_limit_middleware;

pub mod admin_route;
pub mod article_route;
pub mod author_route;
pub mod news_route;

pub fn create_routes(state: AppState) -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/articles", article_route::article_routes(state.clone()))
        .nest("/api/news", news_route::news_routes(state.clone()))
        .nest("/api/authors", author_route::author_routes(state.clone()))
        .nest("/api/admin", admin_route::admin_routes(state.clone()))
        .route("/api/health", axum::routing::get(crate::handlers::health_check_handler))
        .layer(middleware::from_fn_with_state(state, rate_limit_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
