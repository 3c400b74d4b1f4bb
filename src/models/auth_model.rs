use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid, // users.public_id
    pub username: String,
    pub exp: usize,
    pub iat: usize,
}

/// Authenticated caller, injected into request extensions by the auth middleware.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: Uuid,
    #[serde(skip)]
    pub db_id: i64,
    pub username: String,
    pub email: String,
}
