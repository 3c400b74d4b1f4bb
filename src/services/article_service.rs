use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::entities::{article, article::Entity as Article, author};
use crate::models::content_model::*;
use crate::services::content_common::{self as common, db_error, write_error};
use crate::utils::api_response::ServiceResult;

const KIND: ContentKind = ContentKind::Article;

pub struct ArticleService;

impl ArticleService {
    /// Filtered page ordered by title. Serves both list and search.
    pub async fn list_articles(
        db: &DatabaseConnection,
        params: ContentFilterParams,
    ) -> ServiceResult<ContentListResponse> {
        let query = common::filtered(
            Article::find().find_also_related(author::Entity),
            article::Column::Title,
            article::Column::Rating,
            &params,
        );
        let (rows, meta) = common::fetch_page(db, KIND, query, params.page()).await?;

        Ok(ContentListResponse {
            data: rows.into_iter().map(|(model, author)| Self::map_to_response(model, author)).collect(),
            filters: params,
            meta,
        })
    }

    pub async fn get_article(db: &DatabaseConnection, public_id: Uuid) -> ServiceResult<ContentResponse> {
        let (model, author_opt) = Article::find()
            .filter(article::Column::PublicId.eq(public_id))
            .find_also_related(author::Entity)
            .one(db)
            .await
            .map_err(db_error("Database error"))?
            .ok_or_else(|| common::not_found(KIND))?;

        let author = author_opt.ok_or_else(|| common::orphaned(KIND))?;
        Ok(Self::map_to_response(model, author))
    }

    pub async fn create_article(
        db: &DatabaseConnection,
        payload: CreateContentRequest,
    ) -> ServiceResult<ContentResponse> {
        let txn = db.begin().await.map_err(common::begin_error)?;

        let author = common::find_author(&txn, payload.author_id).await?;
        let title = payload.title.trim().to_string();
        common::ensure_unique_title::<Article, _>(
            &txn,
            KIND,
            article::Column::Title,
            article::Column::Id,
            &title,
            None,
        )
        .await?;

        let now = Utc::now();
        let active = article::ActiveModel {
            id: NotSet,
            public_id: Set(Uuid::now_v7()),
            title: Set(title),
            text: Set(payload.text),
            date_creation: Set(now),
            rating: Set(payload.rating),
            category: Set(payload.category.unwrap_or_else(|| KIND.default_category().to_string())),
            added_at: Set(now),
            author_id: Set(author.id),
        };

        let saved = active.insert(&txn).await.map_err(write_error(KIND, "Failed to create article"))?;

        txn.commit().await.map_err(common::commit_error)?;

        tracing::info!("Article {} created by author {}", saved.public_id, author.name);
        Ok(Self::map_to_response(saved, author))
    }

    pub async fn update_article(
        db: &DatabaseConnection,
        public_id: Uuid,
        payload: UpdateContentRequest,
    ) -> ServiceResult<ContentResponse> {
        let txn = db.begin().await.map_err(common::begin_error)?;

        let existing = Article::find()
            .filter(article::Column::PublicId.eq(public_id))
            .one(&txn)
            .await
            .map_err(db_error("Database error"))?
            .ok_or_else(|| common::not_found(KIND))?;

        let author = match payload.author_id {
            Some(author_public_id) => common::find_author(&txn, author_public_id).await?,
            None => author::Entity::find_by_id(existing.author_id)
                .one(&txn)
                .await
                .map_err(db_error("Database error"))?
                .ok_or_else(|| common::orphaned(KIND))?,
        };

        let existing_id = existing.id;
        let mut active: article::ActiveModel = existing.into();

        if let Some(title) = payload.title {
            let title = title.trim().to_string();
            common::ensure_unique_title::<Article, _>(
                &txn,
                KIND,
                article::Column::Title,
                article::Column::Id,
                &title,
                Some(existing_id),
            )
            .await?;
            active.title = Set(title);
        }
        if let Some(text) = payload.text { active.text = Set(text); }
        if let Some(rating) = payload.rating { active.rating = Set(rating); }
        if let Some(category) = payload.category { active.category = Set(category); }
        active.author_id = Set(author.id);
        active.added_at = Set(Utc::now());

        let updated = active.update(&txn).await.map_err(write_error(KIND, "Failed to update article"))?;

        txn.commit().await.map_err(common::commit_error)?;

        Ok(Self::map_to_response(updated, author))
    }

    pub async fn delete_article(db: &DatabaseConnection, public_id: Uuid) -> ServiceResult<DeletedResponse> {
        let res = Article::delete_many()
            .filter(article::Column::PublicId.eq(public_id))
            .exec(db)
            .await
            .map_err(write_error(KIND, "Failed to delete article"))?;

        if res.rows_affected == 0 {
            return Err(common::not_found(KIND));
        }

        Ok(DeletedResponse { redirect_to: KIND.list_location() })
    }

    fn map_to_response(model: article::Model, author: author::Model) -> ContentResponse {
        ContentResponse {
            id: model.public_id,
            title: model.title,
            text: model.text,
            rating: model.rating,
            category: model.category,
            author: ContentAuthorResponse {
                id: author.public_id,
                name: author.name,
            },
            date_creation: model.date_creation,
            added_at: model.added_at,
        }
    }
}
