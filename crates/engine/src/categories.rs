//! Top level of the catalog.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    /// Case and accent folded `name`. Search matches against it.
    pub name_norm: String,
    pub description: String,
    pub image: String,
    pub is_tax_applicable: bool,
    pub tax: f64,
    pub tax_type: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sub_categories::Entity")]
    SubCategories,
}

impl Related<super::sub_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubCategories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A category.
///
/// When `is_tax_applicable` is false, `tax` is `0` and `tax_type` is empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image: String,
    pub is_tax_applicable: bool,
    pub tax: f64,
    pub tax_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Model> for Category {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            image: model.image,
            is_tax_applicable: model.is_tax_applicable,
            tax: model.tax,
            tax_type: model.tax_type,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Fields needed to create a category. `image` is the hosted URL.
#[derive(Clone, Debug, Default)]
pub struct CategoryNew {
    pub name: String,
    pub description: String,
    pub image: String,
    pub is_tax_applicable: bool,
    pub tax: Option<f64>,
    pub tax_type: Option<String>,
}

/// Partial update of a category; `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_tax_applicable: Option<bool>,
    pub tax: Option<f64>,
    pub tax_type: Option<String>,
}
