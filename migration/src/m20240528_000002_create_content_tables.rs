use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Articles and news share one layout; only the default category differs.
        manager
            .create_table(content_table(Articles::Table, "article", "fk_articles_author_id"))
            .await?;
        manager
            .create_table(content_table(News::Table, "new", "fk_news_author_id"))
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_articles_author_id")
                    .table(Articles::Table)
                    .col(Content::AuthorId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_news_author_id")
                    .table(News::Table)
                    .col(Content::AuthorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(News::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Articles::Table).to_owned())
            .await
    }
}

fn content_table<T>(table: T, default_category: &str, fk_name: &str) -> TableCreateStatement
where
    T: Iden + Copy + 'static,
{
    Table::create()
        .table(table)
        .if_not_exists()
        .col(ColumnDef::new(Content::Id).big_integer().not_null().auto_increment().primary_key())
        .col(ColumnDef::new(Content::PublicId).uuid().not_null().unique_key())
        .col(ColumnDef::new(Content::Title).string_len(128).not_null().unique_key())
        .col(ColumnDef::new(Content::Text).text().not_null())
        .col(ColumnDef::new(Content::DateCreation).timestamp_with_time_zone().not_null())
        .col(ColumnDef::new(Content::Rating).small_integer().not_null().check(Expr::col(Content::Rating).gte(0)))
        .col(ColumnDef::new(Content::Category).text().not_null().default(default_category))
        .col(ColumnDef::new(Content::AddedAt).timestamp_with_time_zone().not_null())
        .col(ColumnDef::new(Content::AuthorId).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name(fk_name)
                .from(table, Content::AuthorId)
                .to(Authors::Table, Authors::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[derive(Iden, Clone, Copy)]
enum Articles {
    Table,
}

#[derive(Iden, Clone, Copy)]
enum News {
    Table,
}

#[derive(Iden)]
enum Content {
    Id,
    PublicId,
    Title,
    Text,
    DateCreation,
    Rating,
    Category,
    AddedAt,
    AuthorId,
}

#[derive(Iden)]
enum Authors {
    Table,
    Id,
}
