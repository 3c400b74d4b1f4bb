use axum::{middleware, routing::{get, post}, Router};
use crate::auth::Action;
use crate::config::AppState;
use crate::handlers::admin_handler::*;
use crate::middleware::auth_middleware::auth_middleware;
use crate::middleware::permission_middleware::{permission_middleware, PermissionGate};

/// Policy management is itself a permission (`change_policy`), held by `super`.
pub fn admin_routes(state: AppState) -> Router<AppState> {
    let change_policy = PermissionGate::new(&state.enforcer, "policy", Action::Change);

    Router::new()
        .route("/casbin/policies", get(list_policies_handler))
        .route("/casbin/policy", post(add_policy_handler).delete(remove_policy_handler))
        .route("/casbin/grant", post(grant_role_handler))
        .route_layer(middleware::from_fn_with_state(change_policy, permission_middleware))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
