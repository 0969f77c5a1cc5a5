use log::info;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create profile table
        manager
            .create_table(
                Table::create()
                    .table(Profile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Profile::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Profile::Name).string().not_null())
                    .col(
                        ColumnDef::new(Profile::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Profile::Role)
                            .string()
                            .not_null()
                            .default("ROLE_USER"),
                    )
                    .col(ColumnDef::new(Profile::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Profile::DeletedAt).date_time().null())
                    .to_owned(),
            )
            .await?;

        // Create catalog_entry table
        manager
            .create_table(
                Table::create()
                    .table(CatalogEntry::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CatalogEntry::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CatalogEntry::Name).string().not_null())
                    .col(ColumnDef::new(CatalogEntry::Country).string().null())
                    .col(ColumnDef::new(CatalogEntry::MediaType).string().null())
                    .col(ColumnDef::new(CatalogEntry::CategoryId).string().null())
                    .col(
                        ColumnDef::new(CatalogEntry::PreviewAttachLink)
                            .text()
                            .null(),
                    )
                    .col(ColumnDef::new(CatalogEntry::VideoLink).text().null())
                    .col(
                        ColumnDef::new(CatalogEntry::TranslationLanguage)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CatalogEntry::Status)
                            .string()
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(
                        ColumnDef::new(CatalogEntry::Visible)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(CatalogEntry::ViewCount).big_integer().null())
                    .col(
                        ColumnDef::new(CatalogEntry::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CatalogEntry::DeletedAt).date_time().null())
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_catalog_entry_category_id", CatalogEntry::CategoryId),
            ("idx_catalog_entry_name", CatalogEntry::Name),
            ("idx_catalog_entry_created_at", CatalogEntry::CreatedAt),
            ("idx_catalog_entry_view_count", CatalogEntry::ViewCount),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(CatalogEntry::Table)
                        .col(column)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }

        info!("catalog_entry and profile tables are ready");
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CatalogEntry::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Profile::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Profile {
    Table,
    Id,
    Name,
    Email,
    Role,
    CreatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum CatalogEntry {
    Table,
    Id,
    Name,
    Country,
    MediaType,
    CategoryId,
    PreviewAttachLink,
    VideoLink,
    TranslationLanguage,
    Status,
    Visible,
    ViewCount,
    CreatedAt,
    DeletedAt,
}
