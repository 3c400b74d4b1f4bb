pub mod subscription_repository;
pub mod user_repository;
