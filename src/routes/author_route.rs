use axum::{middleware, routing::{get, post}, Router};
use crate::auth::Action;
use crate::config::AppState;
use crate::handlers::author_handler::*;
use crate::middleware::auth_middleware::auth_middleware;
use crate::middleware::permission_middleware::{permission_middleware, PermissionGate};

pub fn author_routes(state: AppState) -> Router<AppState> {
    let add_author = PermissionGate::new(&state.enforcer, "author", Action::Add);

    Router::new()
        .route("/", get(list_authors_handler))
        .merge(
            Router::new()
                .route(
                    "/create",
                    post(create_author_handler)
                        .layer(middleware::from_fn_with_state(add_author, permission_middleware)),
                )
                .route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
}
