//! Sellable items, each owned by exactly one sub-category.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub sub_category_id: Uuid,
    pub name: String,
    /// Case and accent folded `name`. Search matches against it.
    pub name_norm: String,
    pub description: String,
    pub image: String,
    pub is_tax_applicable: bool,
    pub tax: f64,
    pub base_amount: f64,
    pub discount: f64,
    pub total_amount: f64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sub_categories::Entity",
        from = "Column::SubCategoryId",
        to = "super::sub_categories::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    SubCategory,
}

impl Related<super::sub_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubCategory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// An item.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub id: Uuid,
    pub sub_category_id: Uuid,
    pub name: String,
    pub description: String,
    pub image: String,
    pub is_tax_applicable: bool,
    pub tax: f64,
    pub base_amount: f64,
    pub discount: f64,
    /// Derived: `base_amount - discount`.
    pub total_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Model> for Item {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            sub_category_id: model.sub_category_id,
            name: model.name,
            description: model.description,
            image: model.image,
            is_tax_applicable: model.is_tax_applicable,
            tax: model.tax,
            base_amount: model.base_amount,
            discount: model.discount,
            total_amount: model.total_amount,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ItemNew {
    pub sub_category_id: Uuid,
    pub name: String,
    pub description: String,
    pub image: String,
    pub is_tax_applicable: bool,
    pub tax: Option<f64>,
    pub base_amount: f64,
    pub discount: f64,
}

/// Partial update of an item.
///
/// The total is recomputed from whichever of `base_amount`/`discount` is
/// given, falling back to the stored value for the other one.
#[derive(Clone, Debug, Default)]
pub struct ItemPatch {
    pub sub_category_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_tax_applicable: Option<bool>,
    pub tax: Option<f64>,
    pub base_amount: Option<f64>,
    pub discount: Option<f64>,
}
