use axum::http::StatusCode;
use casbin::{Adapter, CoreApi, DefaultModel, Enforcer};
use sea_orm::DatabaseConnection;
use sea_orm_adapter::SeaOrmAdapter;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::auth_model::CurrentUser;
use crate::utils::api_response::ServiceResult;

pub type SharedEnforcer = Arc<RwLock<Enforcer>>;

/// Requests are `(user public id, object, action)`; users reach policies through `g` role grants.
const RBAC_MODEL: &str = include_str!("rbac_model.conf");

/// Django-style permission actions. Codename is `{action}_{object}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Change,
    Delete,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::Change => "change",
            Action::Delete => "delete",
        }
    }
}

pub async fn setup_casbin(db: DatabaseConnection) -> Result<SharedEnforcer, casbin::Error> {
    let adapter = SeaOrmAdapter::new(db).await?;
    build_enforcer(adapter).await
}

pub async fn build_enforcer<A>(adapter: A) -> Result<SharedEnforcer, casbin::Error>
where
    A: Adapter + 'static,
{
    let model = DefaultModel::from_str(RBAC_MODEL).await?;
    let enforcer = Enforcer::new(model, adapter).await?;
    Ok(Arc::new(RwLock::new(enforcer)))
}

/// Fails closed: an enforcer error denies access just like a missing grant.
pub async fn ensure_permission(
    enforcer: &SharedEnforcer,
    user: &CurrentUser,
    object: &str,
    action: Action,
) -> ServiceResult<()> {
    let subject = user.id.to_string();
    let allowed = {
        let enforcer = enforcer.read().await;
        enforcer.enforce((subject.as_str(), object, action.as_str()))
    };

    match allowed {
        Ok(true) => Ok(()),
        Ok(false) => {
            tracing::warn!("Permission {}_{} denied for user {}", action.as_str(), object, user.username);
            Err((
                StatusCode::FORBIDDEN,
                "ACCESS_DENIED",
                format!("Missing permission {}_{}", action.as_str(), object),
            ))
        }
        Err(e) => {
            tracing::error!("Casbin enforce error: {}", e);
            Err((
                StatusCode::FORBIDDEN,
                "ACCESS_DENIED",
                "Permission check failed".to_string(),
            ))
        }
    }
}
