use sea_orm::*;
use chrono::Utc;
use uuid::Uuid;
use crate::entities::{user, user::Entity as User};

pub struct UserRepository;

impl UserRepository {
    pub async fn find_by_public_id(
        db: &DatabaseConnection,
        public_id: Uuid,
    ) -> Result<Option<user::Model>, DbErr> {
        User::find()
            .filter(user::Column::PublicId.eq(public_id))
            .one(db)
            .await
    }

    pub async fn find_by_username<C>(db: &C, username: &str) -> Result<Option<user::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(db)
            .await
    }

    pub async fn create<C>(
        db: &C,
        username: String,
        email: String,
    ) -> Result<user::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let new_user = user::ActiveModel {
            id: NotSet,
            public_id: Set(Uuid::now_v7()),
            username: Set(username),
            email: Set(email),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
        };

        new_user.insert(db).await
    }
}
