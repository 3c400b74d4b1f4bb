use axum::http::StatusCode;
use sea_orm::*;

use crate::entities::author;
use crate::models::content_model::{ContentKind, ContentResponse};
use crate::repositories::subscription_repository::SubscriptionRepository;
use crate::services::email_service::Mailer;
use crate::utils::api_response::ServiceResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedEmail {
    pub subject: String,
    pub text: String,
    pub html: String,
}

pub struct NotificationService;

impl NotificationService {
    /// Mails every subscriber of the item's author, one message each, in order.
    /// The first transport failure stops the loop; recipients after it are not mailed.
    #[tracing::instrument(
        name = "Notifying subscribers",
        skip(db, mailer, base_url, item),
        fields(kind = kind.object(), item_id = %item.id, author = %item.author.name)
    )]
    pub async fn notify_subscribers(
        db: &DatabaseConnection,
        mailer: &dyn Mailer,
        base_url: &str,
        kind: ContentKind,
        item: &ContentResponse,
    ) -> ServiceResult<usize> {
        let author = author::Entity::find()
            .filter(author::Column::PublicId.eq(item.author.id))
            .one(db)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error".to_string()))?
            .ok_or((StatusCode::NOT_FOUND, "AUTHOR_NOT_FOUND", "Author not found".to_string()))?;

        let emails = SubscriptionRepository::subscriber_emails(db, author.id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load subscribers: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Failed to load subscribers".to_string())
            })?;

        let link = Self::item_link(base_url, kind, item);
        let message = Self::compose(kind, &item.title, &author.name, &link);

        for email in &emails {
            mailer
                .send_email(email, &message.subject, &message.text, &message.html)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to notify {}: {}", email, e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "NOTIFY_FAILED",
                        format!("Item saved, but notifying subscribers failed: {}", e),
                    )
                })?;
        }

        tracing::info!("Notified {} subscriber(s)", emails.len());
        Ok(emails.len())
    }

    pub fn item_link(base_url: &str, kind: ContentKind, item: &ContentResponse) -> String {
        format!("{}/api/{}/{}", base_url.trim_end_matches('/'), kind.path(), item.id)
    }

    pub fn compose(kind: ContentKind, title: &str, author_name: &str, link: &str) -> ComposedEmail {
        let (subject_noun, label, link_label) = match kind {
            ContentKind::New => ("новость", "Новость", "Ссылка на новость"),
            ContentKind::Article => ("статья", "Статья", "Ссылка на статью"),
        };

        ComposedEmail {
            subject: format!("Свежая {} у автора {}", subject_noun, author_name),
            text: format!(
                "{}: {}\nАвтор: {}\n\n{}: {}",
                label, title, author_name, link_label, link
            ),
            html: format!(
                "{}: {}<br>Автор: {}<br><br><a href=\"{}\">{}</a>",
                label,
                escape_html(title),
                escape_html(author_name),
                escape_html(link),
                link_label
            ),
        }
    }
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
