use axum::http::StatusCode;
use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::entities::author;
use crate::models::author_model::{AuthorResponse, CreateAuthorRequest};
use crate::utils::api_response::ServiceResult;

pub struct AuthorService;

impl AuthorService {
    pub async fn list_authors(db: &DatabaseConnection) -> ServiceResult<Vec<AuthorResponse>> {
        let authors = author::Entity::find()
            .order_by_asc(author::Column::Name)
            .all(db)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Failed to fetch authors".to_string()))?;

        Ok(authors.into_iter().map(Self::map_to_response).collect())
    }

    pub async fn create_author(db: &DatabaseConnection, payload: CreateAuthorRequest) -> ServiceResult<AuthorResponse> {
        let name = payload.name.trim().to_string();

        let exists = author::Entity::find()
            .filter(author::Column::Name.eq(&name))
            .one(db)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Author lookup failed".to_string()))?;
        if exists.is_some() {
            return Err((StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "Author with this name already exists".to_string()));
        }

        let saved = author::ActiveModel {
            id: NotSet,
            public_id: Set(Uuid::now_v7()),
            name: Set(name),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, "DB_WRITE_ERR", format!("Failed to create author: {}", e)))?;

        Ok(Self::map_to_response(saved))
    }

    fn map_to_response(model: author::Model) -> AuthorResponse {
        AuthorResponse {
            id: model.public_id,
            name: model.name,
            created_at: model.created_at,
        }
    }
}
