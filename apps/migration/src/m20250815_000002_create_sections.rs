use sea_orm_migration::prelude::*;

use crate::m20250815_000001_create_posts::Posts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sections::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sections::PostId).uuid().not_null())
                    .col(ColumnDef::new(Sections::Type).string().not_null())
                    .col(ColumnDef::new(Sections::Content).text().not_null())
                    .col(ColumnDef::new(Sections::Position).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sections_post_id")
                            .from(Sections::Table, Sections::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // list() reads sections ordered by position within a post.
        manager
            .create_index(
                Index::create()
                    .name("idx_sections_post_id_position")
                    .table(Sections::Table)
                    .col(Sections::PostId)
                    .col(Sections::Position)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sections::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Sections {
    Table,
    Id,
    PostId,
    Type,
    Content,
    Position,
}
