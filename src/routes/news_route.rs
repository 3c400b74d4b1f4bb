use axum::{middleware, routing::{delete, get, post, put}, Router};
use crate::auth::Action;
use crate::config::AppState;
use crate::handlers::news_handler::*;
use crate::handlers::subscription_handler::{list_author_subscriptions_handler, toggle_author_subscription_handler};
use crate::middleware::auth_middleware::auth_middleware;
use crate::middleware::permission_middleware::{permission_middleware, PermissionGate};

const OBJECT: &str = "new";

pub fn news_routes(state: AppState) -> Router<AppState> {
    let add = PermissionGate::new(&state.enforcer, OBJECT, Action::Add);
    let change = PermissionGate::new(&state.enforcer, OBJECT, Action::Change);
    let remove = PermissionGate::new(&state.enforcer, OBJECT, Action::Delete);

    let protected = Router::new()
        .route(
            "/create",
            post(create_news_handler).layer(middleware::from_fn_with_state(add, permission_middleware)),
        )
        .route(
            "/{id}/edit",
            put(update_news_handler).layer(middleware::from_fn_with_state(change, permission_middleware)),
        )
        .route(
            "/{id}/delete",
            delete(delete_news_handler).layer(middleware::from_fn_with_state(remove, permission_middleware)),
        )
        .route(
            "/subscriptions",
            get(list_author_subscriptions_handler).post(toggle_author_subscription_handler),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/", get(list_news_handler))
        .route("/search", get(search_news_handler))
        .route("/{id}", get(get_news_handler))
        .merge(protected)
}
