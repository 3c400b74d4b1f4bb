//! Query and error plumbing shared by the article and news services.

use axum::http::StatusCode;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::*;
use uuid::Uuid;

use crate::entities::author;
use crate::models::content_model::{ContentFilterParams, ContentKind, PaginationMeta, PAGE_SIZE};
use crate::utils::api_response::{ServiceError, ServiceResult};

pub type WithAuthor<E> = SelectTwo<E, author::Entity>;

/// Escapes `!`, `%` and `_` so user input matches literally under `ESCAPE '!'`.
pub fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '!' | '%' | '_') {
            out.push('!');
        }
        out.push(c);
    }
    out
}

/// Case-insensitive substring match. Both sides go through the same SQL `LOWER`,
/// so a needle always matches text it was copied from, whatever the backend folds.
pub fn contains_ci(column: SimpleExpr, needle: &str) -> SimpleExpr {
    Expr::cust_with_exprs(
        "LOWER($1) LIKE LOWER($2) ESCAPE '!'",
        [column, Expr::val(format!("%{}%", escape_like(needle))).into()],
    )
}

/// Applies the title/author/rating filter set and the title ordering.
pub fn filtered<E>(
    mut query: WithAuthor<E>,
    title: E::Column,
    rating: E::Column,
    params: &ContentFilterParams,
) -> WithAuthor<E>
where
    E: EntityTrait,
{
    if let Some(needle) = ContentFilterParams::needle(&params.title) {
        query = query.filter(contains_ci(Expr::col((E::default(), title)).into(), needle));
    }
    if let Some(needle) = ContentFilterParams::needle(&params.author) {
        query = query.filter(contains_ci(
            Expr::col((author::Entity, author::Column::Name)).into(),
            needle,
        ));
    }
    if let Some(min) = params.rating_gt {
        query = query.filter(rating.gt(min));
    }

    query.order_by_asc(title)
}

/// Fetches one `PAGE_SIZE` page. Pages past the end are 404, except an empty first page.
pub async fn fetch_page<E>(
    db: &DatabaseConnection,
    kind: ContentKind,
    query: WithAuthor<E>,
    page: u64,
) -> ServiceResult<(Vec<(E::Model, author::Model)>, PaginationMeta)>
where
    E: EntityTrait,
    E::Model: Sync,
{
    let paginator = query.paginate(db, PAGE_SIZE);
    let counts = paginator.num_items_and_pages().await.map_err(db_error("Count failed"))?;

    if page > 1 && page > counts.number_of_pages {
        return Err((StatusCode::NOT_FOUND, "PAGE_NOT_FOUND", format!("Page {} is out of range", page)));
    }

    let rows = paginator.fetch_page(page - 1).await.map_err(db_error("Fetch failed"))?;
    let rows = rows
        .into_iter()
        .map(|(model, author)| author.map(|a| (model, a)).ok_or_else(|| orphaned(kind)))
        .collect::<ServiceResult<Vec<_>>>()?;

    Ok((
        rows,
        PaginationMeta {
            total: counts.number_of_items,
            page,
            limit: PAGE_SIZE,
            total_pages: counts.number_of_pages,
        },
    ))
}

pub async fn find_author<C>(db: &C, public_id: Uuid) -> ServiceResult<author::Model>
where
    C: ConnectionTrait,
{
    author::Entity::find()
        .filter(author::Column::PublicId.eq(public_id))
        .one(db)
        .await
        .map_err(db_error("Author lookup failed"))?
        .ok_or((StatusCode::BAD_REQUEST, "AUTHOR_NOT_FOUND", format!("Author with ID {} not found", public_id)))
}

pub async fn ensure_unique_title<E, C>(
    db: &C,
    kind: ContentKind,
    title_column: E::Column,
    id_column: E::Column,
    title: &str,
    exclude_id: Option<i64>,
) -> ServiceResult<()>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let mut query = E::find().filter(title_column.eq(title));
    if let Some(id) = exclude_id {
        query = query.filter(id_column.ne(id));
    }

    let taken = query.one(db).await.map_err(db_error("Title check failed"))?.is_some();
    if taken {
        return Err(title_taken(kind));
    }
    Ok(())
}

pub fn not_found(kind: ContentKind) -> ServiceError {
    (StatusCode::NOT_FOUND, kind.not_found_code(), format!("{} not found", kind.label()))
}

pub fn orphaned(kind: ContentKind) -> ServiceError {
    (StatusCode::INTERNAL_SERVER_ERROR, "DATA_CORRUPT", format!("{} has no author", kind.label()))
}

fn title_taken(kind: ContentKind) -> ServiceError {
    (
        StatusCode::BAD_REQUEST,
        "VALIDATION_ERROR",
        format!("{} with this title already exists", kind.label()),
    )
}

pub fn db_error(message: &'static str) -> impl Fn(DbErr) -> ServiceError {
    move |e| {
        tracing::error!("{}: {}", message, e);
        (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", message.to_string())
    }
}

/// Unique-title races that slip past the pre-check still surface as validation errors.
pub fn write_error(kind: ContentKind, message: &'static str) -> impl Fn(DbErr) -> ServiceError {
    move |e| {
        if let Some(SqlErr::UniqueConstraintViolation(_)) = e.sql_err() {
            return title_taken(kind);
        }
        tracing::error!("{}: {}", message, e);
        (StatusCode::INTERNAL_SERVER_ERROR, "DB_WRITE_ERR", format!("{}: {}", message, e))
    }
}

pub fn begin_error(_: DbErr) -> ServiceError {
    (StatusCode::INTERNAL_SERVER_ERROR, "TXN_ERR", "Transaction start failed".to_string())
}

pub fn commit_error(_: DbErr) -> ServiceError {
    (StatusCode::INTERNAL_SERVER_ERROR, "TXN_COMMIT_ERR", "Transaction commit failed".to_string())
}
