use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Number of items on one list/search page.
pub const PAGE_SIZE: u64 = 2;

/// The two publishable entity kinds. They share one layout and differ in
/// default category, URL prefix, and mail wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Article,
    New,
}

impl ContentKind {
    /// Object name used in permission codenames (`add_article`, `change_new`, ...).
    pub fn object(self) -> &'static str {
        match self {
            ContentKind::Article => "article",
            ContentKind::New => "new",
        }
    }

    /// Human name used in messages.
    pub fn label(self) -> &'static str {
        match self {
            ContentKind::Article => "Article",
            ContentKind::New => "News item",
        }
    }

    pub fn not_found_code(self) -> &'static str {
        match self {
            ContentKind::Article => "ARTICLE_NOT_FOUND",
            ContentKind::New => "NEWS_NOT_FOUND",
        }
    }

    pub fn default_category(self) -> &'static str {
        self.object()
    }

    /// Path segment under `/api`.
    pub fn path(self) -> &'static str {
        match self {
            ContentKind::Article => "articles",
            ContentKind::New => "news",
        }
    }

    pub fn list_location(self) -> String {
        format!("/api/{}", self.path())
    }
}

#[derive(Deserialize, Validate)]
pub struct CreateContentRequest {
    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(length(max = 128, message = "Title must be at most 128 characters"))]
    pub title: String,

    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    pub text: String,

    #[validate(range(min = 0, message = "Rating must not be negative"))]
    pub rating: i16,

    pub category: Option<String>,

    pub author_id: Uuid, // Author public id
}

#[derive(Deserialize, Validate)]
pub struct UpdateContentRequest {
    #[validate(custom(function = "crate::utils::validator_utils::validate_not_blank"))]
    #[validate(length(max = 128, message = "Title must be at most 128 characters"))]
    pub title: Option<String>,
    #[validate(custom(function = "crate::utils::validator_utils::validate_not_blank"))]
    pub text: Option<String>,
    #[validate(range(min = 0, message = "Rating must not be negative"))]
    pub rating: Option<i16>,
    pub category: Option<String>,
    pub author_id: Option<Uuid>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ContentAuthorResponse {
    pub id: Uuid,
    pub name: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct ContentResponse {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub rating: i16,
    pub category: String,
    pub author: ContentAuthorResponse,
    pub date_creation: chrono::DateTime<chrono::Utc>,
    pub added_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize)]
pub struct ContentDetailResponse {
    #[serde(flatten)]
    pub item: ContentResponse,
    pub time_now: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize)]
pub struct DeletedResponse {
    pub redirect_to: String,
}

/// Query-string filter set shared by list and search.
#[derive(Deserialize, Serialize, Default, Debug, Clone)]
pub struct ContentFilterParams {
    #[serde(skip_serializing)]
    pub page: Option<u64>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub rating_gt: Option<i16>,
}

impl ContentFilterParams {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Trimmed needle; blank values mean "no filter". Case folding happens in SQL.
    pub fn needle(value: &Option<String>) -> Option<&str> {
        value
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Serialize)]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

#[derive(Serialize)]
pub struct ContentListResponse {
    pub data: Vec<ContentResponse>,
    pub filters: ContentFilterParams,
    pub meta: PaginationMeta,
}
