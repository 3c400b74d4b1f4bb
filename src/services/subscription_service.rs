use axum::http::StatusCode;
use sea_orm::*;
use uuid::Uuid;

use crate::entities::author;
use crate::models::subscription_model::{AuthorSubscriptionStatus, ACTION_SUBSCRIBE, ACTION_UNSUBSCRIBE};
use crate::repositories::subscription_repository::SubscriptionRepository;
use crate::utils::api_response::ServiceResult;

pub struct SubscriptionService;

impl SubscriptionService {
    /// Applies a toggle action for `user_id`. `subscribe` always inserts,
    /// `unsubscribe` clears every matching row, anything else is ignored.
    #[tracing::instrument(name = "Toggling subscription", skip(db))]
    pub async fn toggle(
        db: &DatabaseConnection,
        user_id: i64,
        author_public_id: Uuid,
        action: &str,
    ) -> ServiceResult<()> {
        let author = author::Entity::find()
            .filter(author::Column::PublicId.eq(author_public_id))
            .one(db)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error".to_string()))?
            .ok_or((StatusCode::NOT_FOUND, "AUTHOR_NOT_FOUND", "Author not found".to_string()))?;

        match action {
            ACTION_SUBSCRIBE => {
                SubscriptionRepository::create(db, user_id, author.id)
                    .await
                    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, "DB_WRITE_ERR", format!("Failed to subscribe: {}", e)))?;
            }
            ACTION_UNSUBSCRIBE => {
                let removed = SubscriptionRepository::delete(db, user_id, author.id)
                    .await
                    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, "DB_WRITE_ERR", format!("Failed to unsubscribe: {}", e)))?;
                tracing::debug!("Removed {} subscription row(s)", removed);
            }
            other => tracing::debug!("Ignoring unknown subscription action {:?}", other),
        }

        Ok(())
    }

    /// Every author ordered by name, flagged when `user_id` follows it.
    pub async fn list_with_status(db: &DatabaseConnection, user_id: i64) -> ServiceResult<Vec<AuthorSubscriptionStatus>> {
        let subscribed = SubscriptionRepository::subscribed_author_ids(db, user_id)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Failed to fetch subscriptions".to_string()))?;

        let authors = author::Entity::find()
            .order_by_asc(author::Column::Name)
            .all(db)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Failed to fetch authors".to_string()))?;

        Ok(authors
            .into_iter()
            .map(|a| AuthorSubscriptionStatus {
                user_subscribed: subscribed.contains(&a.id),
                id: a.public_id,
                name: a.name,
            })
            .collect())
    }
}
