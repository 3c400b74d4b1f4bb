use axum::{extract::State, response::IntoResponse};

use crate::config::AppState;
use crate::models::author_model::CreateAuthorRequest;
use crate::services::author_service::AuthorService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn list_authors_handler(State(state): State<AppState>) -> impl IntoResponse {
    ResponseBuilder::from_result(AuthorService::list_authors(&state.db).await, "AUTHORS_FETCHED", "Success")
}

pub async fn create_author_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAuthorRequest>,
) -> impl IntoResponse {
    match AuthorService::create_author(&state.db, payload).await {
        Ok(res) => ResponseBuilder::created("AUTHOR_CREATED", "Author created", res).into_response(),
        Err((status, code, msg)) => ResponseBuilder::error::<()>(status, code, &msg).into_response(),
    }
}
