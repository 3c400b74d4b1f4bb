pub mod article_service;
pub mod author_service;
pub mod content_common;
pub mod email_service;
pub mod news_service;
pub mod notification_service;
pub mod subscription_service;
