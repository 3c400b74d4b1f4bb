pub mod casbin_seeder;
pub mod user_seeder;

use sea_orm::DatabaseConnection;
use crate::auth::SharedEnforcer;

pub async fn run_seeders(db: &DatabaseConnection, enforcer: &SharedEnforcer) -> Result<(), String> {
    // Policies before grants: the super user is linked to an existing role.
    casbin_seeder::seed_casbin_policies(enforcer).await.map_err(|e| e.to_string())?;

    user_seeder::seed_super_user(db, enforcer).await?;

    Ok(())
}
