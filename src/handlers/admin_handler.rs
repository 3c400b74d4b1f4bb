use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Extension,
};
use casbin::{MgmtApi, RbacApi};

use crate::config::AppState;
use crate::models::admin_model::{CasbinPolicyRequest, PolicyResponse, RoleGrantRequest};
use crate::models::auth_model::CurrentUser;
use crate::repositories::user_repository::UserRepository;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn list_policies_handler(
    State(state): State<AppState>,
) -> impl IntoResponse {
    let enforcer = state.enforcer.read().await;
    // `p` rules only; role grants (`g`) are not part of this listing.
    let policies: Vec<PolicyResponse> = enforcer
        .get_policy()
        .into_iter()
        .filter_map(|rule| match rule.as_slice() {
            [sub, obj, act] => Some(PolicyResponse {
                sub: sub.clone(),
                obj: obj.clone(),
                act: act.clone(),
            }),
            _ => None,
        })
        .collect();

    ResponseBuilder::success("POLICIES_FETCHED", "Successfully fetched all policies", policies).into_response()
}

pub async fn add_policy_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CasbinPolicyRequest>,
) -> impl IntoResponse {
    let mut enforcer = state.enforcer.write().await;
    match enforcer.add_policy(vec![payload.sub.clone(), payload.obj.clone(), payload.act.clone()]).await {
        Ok(true) => ResponseBuilder::success("POLICY_ADDED", "Policy added successfully", payload).into_response(),
        Ok(false) => ResponseBuilder::error::<()>(StatusCode::CONFLICT, "POLICY_EXISTS", "Policy already exists").into_response(),
        Err(e) => ResponseBuilder::error::<()>(StatusCode::INTERNAL_SERVER_ERROR, "CASBIN_ERR", &e.to_string()).into_response(),
    }
}

pub async fn remove_policy_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CasbinPolicyRequest>,
) -> impl IntoResponse {
    let mut enforcer = state.enforcer.write().await;
    match enforcer.remove_policy(vec![payload.sub, payload.obj, payload.act]).await {
        Ok(true) => ResponseBuilder::success("POLICY_REMOVED", "Policy removed successfully", ()).into_response(),
        Ok(false) => ResponseBuilder::error::<()>(StatusCode::NOT_FOUND, "POLICY_NOT_FOUND", "Policy not found").into_response(),
        Err(e) => ResponseBuilder::error::<()>(StatusCode::INTERNAL_SERVER_ERROR, "CASBIN_ERR", &e.to_string()).into_response(),
    }
}

/// Assigns a role (`g, <user public id>, <role>`) to an existing user.
pub async fn grant_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<RoleGrantRequest>,
) -> impl IntoResponse {
    match UserRepository::find_by_public_id(&state.db, payload.user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return ResponseBuilder::error::<()>(StatusCode::NOT_FOUND, "USER_NOT_FOUND", "User not found").into_response(),
        Err(_) => return ResponseBuilder::error::<()>(StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error").into_response(),
    }

    let mut enforcer = state.enforcer.write().await;
    match enforcer.add_grouping_policy(vec![payload.user_id.to_string(), payload.role.clone()]).await {
        Ok(_) => {
            let roles = enforcer.get_roles_for_user(&payload.user_id.to_string(), None);
            tracing::info!("{} granted role {} to {}", user.username, payload.role, payload.user_id);
            ResponseBuilder::success("ROLE_GRANTED", "Role granted", roles).into_response()
        }
        Err(e) => ResponseBuilder::error::<()>(StatusCode::INTERNAL_SERVER_ERROR, "CASBIN_ERR", &e.to_string()).into_response(),
    }
}
