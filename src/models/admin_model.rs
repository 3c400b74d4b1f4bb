use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Serialize, Validate)]
pub struct CasbinPolicyRequest {
    #[validate(length(min = 1))]
    pub sub: String, // role or user public id
    #[validate(length(min = 1))]
    pub obj: String, // article | new | author | policy | *
    #[validate(length(min = 1))]
    pub act: String, // add | change | delete | *
}

#[derive(Deserialize, Serialize, Validate)]
pub struct RoleGrantRequest {
    pub user_id: Uuid,
    #[validate(length(min = 1))]
    pub role: String,
}

#[derive(Serialize)]
pub struct PolicyResponse {
    pub sub: String,
    pub obj: String,
    pub act: String,
}
