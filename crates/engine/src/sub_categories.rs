//! Sub-categories, each owned by exactly one category.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sub_category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    /// Case and accent folded `name`. Search matches against it.
    pub name_norm: String,
    pub description: String,
    pub image: String,
    pub is_tax_applicable: bool,
    pub tax: f64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Category,
    #[sea_orm(has_many = "super::items::Entity")]
    Items,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A sub-category.
///
/// `is_tax_applicable` and `tax` are a snapshot of the parent category taken
/// at creation time. Later edits of the category do not reach them.
#[derive(Clone, Debug, PartialEq)]
pub struct SubCategory {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub description: String,
    pub image: String,
    pub is_tax_applicable: bool,
    pub tax: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Model> for SubCategory {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            category_id: model.category_id,
            name: model.name,
            description: model.description,
            image: model.image,
            is_tax_applicable: model.is_tax_applicable,
            tax: model.tax,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Fields needed to create a sub-category. Tax fields come from the parent.
#[derive(Clone, Debug)]
pub struct SubCategoryNew {
    pub category_id: Uuid,
    pub name: String,
    pub description: String,
    pub image: String,
}

#[derive(Clone, Debug, Default)]
pub struct SubCategoryPatch {
    pub category_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_tax_applicable: Option<bool>,
    pub tax: Option<f64>,
}
