use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::{ensure_permission, Action, SharedEnforcer};
use crate::models::auth_model::CurrentUser;
use crate::utils::api_response::ResponseBuilder;

/// One `{action}_{object}` requirement bound to a route. Runs after
/// `auth_middleware` and before any body extraction.
#[derive(Clone)]
pub struct PermissionGate {
    enforcer: SharedEnforcer,
    object: &'static str,
    action: Action,
}

impl PermissionGate {
    pub fn new(enforcer: &SharedEnforcer, object: &'static str, action: Action) -> Self {
        Self {
            enforcer: enforcer.clone(),
            object,
            action,
        }
    }
}

pub async fn permission_middleware(
    State(gate): State<PermissionGate>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(user) = req.extensions().get::<CurrentUser>().cloned() else {
        return ResponseBuilder::error::<()>(
            StatusCode::UNAUTHORIZED,
            "AUTH_MISSING",
            "Authentication required",
        )
        .into_response();
    };

    match ensure_permission(&gate.enforcer, &user, gate.object, gate.action).await {
        Ok(()) => next.run(req).await,
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}
