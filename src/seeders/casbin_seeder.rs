use casbin::MgmtApi;
use crate::auth::SharedEnforcer;

/// `(role, object, action)` rows granted out of the box.
pub const DEFAULT_POLICIES: &[(&str, &str, &str)] = &[
    ("super", "*", "*"),
    ("editor", "article", "*"),
    ("editor", "new", "*"),
    ("editor", "author", "add"),
];

pub async fn seed_casbin_policies(enforcer: &SharedEnforcer) -> Result<(), casbin::Error> {
    let mut e = enforcer.write().await;

    let mut added = 0;
    for (sub, obj, act) in DEFAULT_POLICIES {
        // add_policy answers false for rows that already exist
        if e.add_policy(vec![sub.to_string(), obj.to_string(), act.to_string()]).await? {
            added += 1;
        }
    }

    tracing::info!("Seeded {} casbin policies", added);
    Ok(())
}
