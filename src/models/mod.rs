pub mod admin_model;
pub mod auth_model;
pub mod author_model;
pub mod content_model;
pub mod subscription_model;
