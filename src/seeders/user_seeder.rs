use sea_orm::*;
use casbin::{MgmtApi, RbacApi};
use std::env;

use crate::auth::SharedEnforcer;
use crate::repositories::user_repository::UserRepository;

const SUPER_ROLE: &str = "super";

/// Creates the super user if missing, then makes sure it holds the `super` role.
/// The grant runs after the row is stored, and again on every boot, so a failed
/// grant is repaired by the next start instead of leaving a role with no user.
pub async fn seed_super_user(db: &DatabaseConnection, enforcer: &SharedEnforcer) -> Result<(), String> {
    let username = env::var("SUPERUSER_NAME").unwrap_or_else(|_| "superadmin".to_string());
    let email = env::var("SUPERUSER_EMAIL").unwrap_or_else(|_| "super@newsdesk.dev".to_string());

    let existing = UserRepository::find_by_username(db, &username)
        .await
        .map_err(|e| e.to_string())?;

    let user_model = match existing {
        Some(user) => user,
        None => {
            let user = UserRepository::create(db, username.clone(), email)
                .await
                .map_err(|e| e.to_string())?;
            tracing::info!("Super user {} created with id {}", username, user.public_id);
            user
        }
    };

    let subject = user_model.public_id.to_string();
    let mut e = enforcer.write().await;
    if !e.has_role_for_user(&subject, SUPER_ROLE, None) {
        e.add_grouping_policy(vec![subject, SUPER_ROLE.to_string()])
            .await
            .map_err(|e| e.to_string())?;
        tracing::info!("Granted {} to super user {}", SUPER_ROLE, username);
    }

    Ok(())
}
