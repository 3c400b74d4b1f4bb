pub use sea_orm_migration::prelude::*;

mod m20240528_000001_create_users_and_authors;
mod m20240528_000002_create_content_tables;
mod m20240528_000003_create_subscriptions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240528_000001_create_users_and_authors::Migration),
            Box::new(m20240528_000002_create_content_tables::Migration),
            Box::new(m20240528_000003_create_subscriptions::Migration),
        ]
    }
}
