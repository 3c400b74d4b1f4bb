use axum::{
    extract::State,
    response::IntoResponse,
    Extension,
};
use chrono::Utc;
use uuid::Uuid;

use crate::config::AppState;
use crate::models::{auth_model::CurrentUser, content_model::*};
use crate::services::news_service::NewsService;
use crate::services::notification_service::NotificationService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::{ValidatedJson, ValidatedPath, ValidatedQuery};

const KIND: ContentKind = ContentKind::New;

pub async fn list_news_handler(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<ContentFilterParams>,
) -> impl IntoResponse {
    ResponseBuilder::from_result(
        NewsService::list_news(&state.db, params).await,
        "NEWS_FETCHED",
        "Success",
    )
}

pub async fn search_news_handler(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<ContentFilterParams>,
) -> impl IntoResponse {
    ResponseBuilder::from_result(
        NewsService::list_news(&state.db, params).await,
        "NEWS_SEARCHED",
        "Success",
    )
}

pub async fn get_news_handler(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> impl IntoResponse {
    let result = NewsService::get_news(&state.db, id)
        .await
        .map(|item| ContentDetailResponse { item, time_now: Utc::now() });
    ResponseBuilder::from_result(result, "NEWS_FETCHED", "Success")
}

pub async fn create_news_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateContentRequest>,
) -> impl IntoResponse {
    let created = match NewsService::create_news(&state.db, payload).await {
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

    tracing::info!("News item {} published by {}", created.id, user.username);
    ResponseBuilder::created("NEWS_CREATED", "News item created", created).into_response()
}

pub async fn update_news_handler(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateContentRequest>,
) -> impl IntoResponse {
    ResponseBuilder::from_result(
        NewsService::update_news(&state.db, id, payload).await,
        "NEWS_UPDATED",
        "News item updated",
    )
}

pub async fn delete_news_handler(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> impl IntoResponse {
    match NewsService::delete_news(&state.db, id).await {
        Ok(res) => ResponseBuilder::success("NEWS_DELETED", "News item deleted", res).into_response(),
        Err((status, code, msg)) => {
            if status.is_server_error() {
                tracing::error!("News item {} delete failed: {}", id, msg);
            }
            ResponseBuilder::error::<()>(status, code, &msg).into_response()
        }
    }
}
