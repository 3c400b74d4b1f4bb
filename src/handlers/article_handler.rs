use axum::{
    extract::State,
    response::IntoResponse,
    Extension,
};
use chrono::Utc;
use uuid::Uuid;

use crate::config::AppState;
use crate::models::{auth_model::CurrentUser, content_model::*};
use crate::services::article_service::ArticleService;
use crate::services::notification_service::NotificationService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::{ValidatedJson, ValidatedPath, ValidatedQuery};

const KIND: ContentKind = ContentKind::Article;

pub async fn list_articles_handler(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<ContentFilterParams>,
) -> impl IntoResponse {
    ResponseBuilder::from_result(
        ArticleService::list_articles(&state.db, params).await,
        "ARTICLES_FETCHED",
        "Success",
    )
}

pub async fn search_articles_handler(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<ContentFilterParams>,
) -> impl IntoResponse {
    ResponseBuilder::from_result(
        ArticleService::list_articles(&state.db, params).await,
        "ARTICLES_SEARCHED",
        "Success",
    )
}

pub async fn get_article_handler(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> impl IntoResponse {
    let result = ArticleService::get_article(&state.db, id)
        .await
        .map(|item| ContentDetailResponse { item, time_now: Utc::now() });
    ResponseBuilder::from_result(result, "ARTICLE_FETCHED", "Success")
}

pub async fn create_article_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateContentRequest>,
) -> impl IntoResponse {
    let created = match ArticleService::create_article(&state.db, payload).await {
        Ok(res) => res,
        Err((status, code, msg)) => return ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    };

    if let Err((status, code, msg)) = NotificationService::notify_subscribers(
        &state.db,
        state.mailer.as_ref(),
        &state.config.app_base_url,
        KIND,
        &created,
    )
    .await
    {
        return ResponseBuilder::error::<()>(status, code, &msg).into_response();
    }

    tracing::info!("Article {} published by {}", created.id, user.username);
    ResponseBuilder::created("ARTICLE_CREATED", "Article created", created).into_response()
}

pub async fn update_article_handler(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateContentRequest>,
) -> impl IntoResponse {
    ResponseBuilder::from_result(
        ArticleService::update_article(&state.db, id, payload).await,
        "ARTICLE_UPDATED",
        "Article updated",
    )
}

pub async fn delete_article_handler(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> impl IntoResponse {
    match ArticleService::delete_article(&state.db, id).await {
        Ok(res) => ResponseBuilder::success("ARTICLE_DELETED", "Article deleted", res).into_response(),
        Err((status, code, msg)) => {
            if status.is_server_error() {
                tracing::error!("Article {} delete failed: {}", id, msg);
            }
            ResponseBuilder::error::<()>(status, code, &msg).into_response()
        }
    }
}
