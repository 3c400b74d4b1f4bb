use std::collections::HashSet;

use chrono::Utc;
use sea_orm::*;

use crate::entities::{subscription, user};

pub struct SubscriptionRepository;

impl SubscriptionRepository {
    /// Always inserts; repeated calls leave duplicate rows.
    pub async fn create(
        db: &DatabaseConnection,
        user_id: i64,
        author_id: i64,
    ) -> Result<subscription::Model, DbErr> {
        subscription::ActiveModel {
            id: NotSet,
            user_id: Set(user_id),
            author_id: Set(author_id),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await
    }

    /// Removes every row for the pair and reports how many went.
    pub async fn delete(db: &DatabaseConnection, user_id: i64, author_id: i64) -> Result<u64, DbErr> {
        let res = subscription::Entity::delete_many()
            .filter(subscription::Column::UserId.eq(user_id))
            .filter(subscription::Column::AuthorId.eq(author_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    pub async fn subscribed_author_ids(db: &DatabaseConnection, user_id: i64) -> Result<HashSet<i64>, DbErr> {
        let ids: Vec<i64> = subscription::Entity::find()
            .select_only()
            .column(subscription::Column::AuthorId)
            .filter(subscription::Column::UserId.eq(user_id))
            .into_tuple()
            .all(db)
            .await?;
        Ok(ids.into_iter().collect())
    }

    /// Addresses of the users following `author_id`, one per user: duplicate
    /// rows collapse, accounts sharing an address each get their own entry.
    pub async fn subscriber_emails(db: &DatabaseConnection, author_id: i64) -> Result<Vec<String>, DbErr> {
        let rows: Vec<(i64, String)> = user::Entity::find()
            .select_only()
            .column(user::Column::Id)
            .column(user::Column::Email)
            .distinct()
            .inner_join(subscription::Entity)
            .filter(subscription::Column::AuthorId.eq(author_id))
            .order_by_asc(user::Column::Email)
            .order_by_asc(user::Column::Id)
            .into_tuple()
            .all(db)
            .await?;
        Ok(rows.into_iter().map(|(_, email)| email).collect())
    }

    pub async fn count_for(db: &DatabaseConnection, user_id: i64, author_id: i64) -> Result<u64, DbErr> {
        subscription::Entity::find()
            .filter(subscription::Column::UserId.eq(user_id))
            .filter(subscription::Column::AuthorId.eq(author_id))
            .count(db)
            .await
    }
}
