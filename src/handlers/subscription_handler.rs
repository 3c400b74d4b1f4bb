use axum::{extract::State, response::IntoResponse, Extension};

use crate::config::AppState;
use crate::models::{auth_model::CurrentUser, subscription_model::*};
use crate::services::subscription_service::SubscriptionService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;

// News flow: the list is keyed `authors`.

pub async fn list_author_subscriptions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> impl IntoResponse {
    let result = SubscriptionService::list_with_status(&state.db, user.db_id)
        .await
        .map(|authors| AuthorSubscriptionsResponse { authors });
    ResponseBuilder::from_result(result, "SUBSCRIPTIONS_FETCHED", "Success")
}

pub async fn toggle_author_subscription_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<AuthorSubscriptionRequest>,
) -> impl IntoResponse {
    if let Err((status, code, msg)) =
        SubscriptionService::toggle(&state.db, user.db_id, payload.author_id, &payload.action).await
    {
        return ResponseBuilder::error::<()>(status, code, &msg).into_response();
    }

    let result = SubscriptionService::list_with_status(&state.db, user.db_id)
        .await
        .map(|authors| AuthorSubscriptionsResponse { authors });
    ResponseBuilder::from_result(result, "SUBSCRIPTIONS_UPDATED", "Subscriptions updated")
}

// Article flow: the same rows, presented as `categories`.

pub async fn list_category_subscriptions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> impl IntoResponse {
    let result = SubscriptionService::list_with_status(&state.db, user.db_id)
        .await
        .map(|categories| CategorySubscriptionsResponse { categories });
    ResponseBuilder::from_result(result, "SUBSCRIPTIONS_FETCHED", "Success")
}

pub async fn toggle_category_subscription_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CategorySubscriptionRequest>,
) -> impl IntoResponse {
    if let Err((status, code, msg)) =
        SubscriptionService::toggle(&state.db, user.db_id, payload.category_id, &payload.action).await
    {
        return ResponseBuilder::error::<()>(status, code, &msg).into_response();
    }

    let result = SubscriptionService::list_with_status(&state.db, user.db_id)
        .await
        .map(|categories| CategorySubscriptionsResponse { categories });
    ResponseBuilder::from_result(result, "SUBSCRIPTIONS_UPDATED", "Subscriptions updated")
}
