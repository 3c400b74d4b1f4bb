pub mod article;
pub mod author;
pub mod news;
pub mod subscription;
pub mod user;
