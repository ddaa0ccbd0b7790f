//! Catalog schema: categories, sub-categories and items.
//!
//! - `category`: top level of the catalog, `name` is unique
//! - `sub_category`: belongs to one category, tax fields copied on creation
//! - `item`: belongs to one sub-category, carries the pricing fields
//!
//! Every table keeps `name_norm`, the case and accent folded name that
//! search matches against.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Category {
    Table,
    Id,
    Name,
    NameNorm,
    Description,
    Image,
    IsTaxApplicable,
    Tax,
    TaxType,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum SubCategory {
    Table,
    Id,
    CategoryId,
    Name,
    NameNorm,
    Description,
    Image,
    IsTaxApplicable,
    Tax,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Item {
    Table,
    Id,
    SubCategoryId,
    Name,
    NameNorm,
    Description,
    Image,
    IsTaxApplicable,
    Tax,
    BaseAmount,
    Discount,
    TotalAmount,
    CreatedAt,
    UpdatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Category
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Category::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Category::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Category::Name).string().not_null())
                    .col(ColumnDef::new(Category::NameNorm).string().not_null())
                    .col(ColumnDef::new(Category::Description).string().not_null())
                    .col(ColumnDef::new(Category::Image).string().not_null())
                    .col(
                        ColumnDef::new(Category::IsTaxApplicable)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Category::Tax).double().not_null().default(0.0))
                    .col(
                        ColumnDef::new(Category::TaxType)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Category::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Category::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // The handlers look names up before inserting, but only this index
        // holds under concurrent writers.
        manager
            .create_index(
                Index::create()
                    .name("idx-category-name-unique")
                    .table(Category::Table)
                    .col(Category::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-category-created_at")
                    .table(Category::Table)
                    .col(Category::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Sub-category
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(SubCategory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubCategory::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SubCategory::CategoryId).uuid().not_null())
                    .col(ColumnDef::new(SubCategory::Name).string().not_null())
                    .col(ColumnDef::new(SubCategory::NameNorm).string().not_null())
                    .col(ColumnDef::new(SubCategory::Description).string().not_null())
                    .col(ColumnDef::new(SubCategory::Image).string().not_null())
                    .col(
                        ColumnDef::new(SubCategory::IsTaxApplicable)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SubCategory::Tax)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(SubCategory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubCategory::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sub_category-category_id")
                            .from(SubCategory::Table, SubCategory::CategoryId)
                            .to(Category::Table, Category::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-sub_category-category_id")
                    .table(SubCategory::Table)
                    .col(SubCategory::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-sub_category-created_at")
                    .table(SubCategory::Table)
                    .col(SubCategory::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Item
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Item::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Item::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Item::SubCategoryId).uuid().not_null())
                    .col(ColumnDef::new(Item::Name).string().not_null())
                    .col(ColumnDef::new(Item::NameNorm).string().not_null())
                    .col(ColumnDef::new(Item::Description).string().not_null())
                    .col(ColumnDef::new(Item::Image).string().not_null())
                    .col(
                        ColumnDef::new(Item::IsTaxApplicable)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Item::Tax).double().not_null().default(0.0))
                    .col(ColumnDef::new(Item::BaseAmount).double().not_null())
                    .col(ColumnDef::new(Item::Discount).double().not_null())
                    .col(ColumnDef::new(Item::TotalAmount).double().not_null())
                    .col(
                        ColumnDef::new(Item::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Item::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-item-sub_category_id")
                            .from(Item::Table, Item::SubCategoryId)
                            .to(SubCategory::Table, SubCategory::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-item-sub_category_id")
                    .table(Item::Table)
                    .col(Item::SubCategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-item-created_at")
                    .table(Item::Table)
                    .col(Item::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Children first, the foreign keys point upwards.
        manager
            .drop_table(Table::drop().table(Item::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubCategory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Category::Table).to_owned())
            .await?;
        Ok(())
    }
}
