use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

pub const ACTION_SUBSCRIBE: &str = "subscribe";
pub const ACTION_UNSUBSCRIBE: &str = "unsubscribe";

/// Toggle payload of the news flow.
#[derive(Deserialize, Validate)]
pub struct AuthorSubscriptionRequest {
    pub author_id: Uuid,
    #[serde(default)]
    pub action: String,
}

/// Toggle payload of the article flow. The category names an author row.
#[derive(Deserialize, Validate)]
pub struct CategorySubscriptionRequest {
    pub category_id: Uuid,
    #[serde(default)]
    pub action: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct AuthorSubscriptionStatus {
    pub id: Uuid,
    pub name: String,
    pub user_subscribed: bool,
}

#[derive(Serialize)]
pub struct AuthorSubscriptionsResponse {
    pub authors: Vec<AuthorSubscriptionStatus>,
}

#[derive(Serialize)]
pub struct CategorySubscriptionsResponse {
    pub categories: Vec<AuthorSubscriptionStatus>,
}
