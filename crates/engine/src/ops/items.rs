use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Item, ItemNew, ItemPatch, ListQuery, Page, ResultEngine, items,
    pagination::{fetch_page, name_contains},
    util::fold_name,
};

use super::{
    Engine, applicable_tax, normalize_optional_text, normalize_required_text, validate_amount,
    validate_optional_amount, with_tx,
};

const LABEL: &str = "Item";

/// `base_amount - discount`.
pub(crate) fn total_amount(base_amount: f64, discount: f64) -> f64 {
    base_amount - discount
}

impl ItemNew {
    /// Reject the values [`Engine::create_item`] would reject, without
    /// touching the store.
    pub fn validate(&self) -> ResultEngine<()> {
        normalize_required_text(&self.name, "name")?;
        validate_amount(self.base_amount, "baseAmount")?;
        validate_amount(self.discount, "discount")?;
        validate_optional_amount(self.tax, "tax")?;
        Ok(())
    }
}

impl ItemPatch {
    pub fn validate(&self) -> ResultEngine<()> {
        normalize_optional_text(self.name.clone(), "name")?;
        validate_optional_amount(self.base_amount, "baseAmount")?;
        validate_optional_amount(self.discount, "discount")?;
        validate_optional_amount(self.tax, "tax")?;
        Ok(())
    }
}

impl Engine {
    /// Return the item with the given id.
    pub async fn item(&self, id: Uuid) -> ResultEngine<Item> {
        items::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(Item::from)
            .ok_or_else(|| EngineError::KeyNotFound(LABEL.to_string()))
    }

    /// Create an item under an existing sub-category.
    pub async fn create_item(&self, new: ItemNew) -> ResultEngine<Item> {
        let name = normalize_required_text(&new.name, "name")?;
        let base_amount = validate_amount(new.base_amount, "baseAmount")?;
        let discount = validate_amount(new.discount, "discount")?;
        let tax = validate_optional_amount(new.tax, "tax")?.unwrap_or(0.0);

        with_tx!(self, |db_tx| {
            let parent = Self::require_sub_category(&db_tx, new.sub_category_id).await?;

            let now = Utc::now();
            let active = items::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                sub_category_id: ActiveValue::Set(parent.id),
                name_norm: ActiveValue::Set(fold_name(&name)),
                name: ActiveValue::Set(name),
                description: ActiveValue::Set(new.description),
                image: ActiveValue::Set(new.image),
                is_tax_applicable: ActiveValue::Set(new.is_tax_applicable),
                tax: ActiveValue::Set(applicable_tax(new.is_tax_applicable, tax)),
                base_amount: ActiveValue::Set(base_amount),
                discount: ActiveValue::Set(discount),
                total_amount: ActiveValue::Set(total_amount(base_amount, discount)),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            };
            let model = active.insert(&db_tx).await?;
            tracing::debug!(id = %model.id, sub_category_id = %parent.id, "item created");
            Ok(Item::from(model))
        })
    }

    /// Apply a partial update to an item.
    ///
    /// `total_amount` is recomputed on every update, and `tax` is reset
    /// whenever the resulting item is not taxable.
    pub async fn update_item(&self, id: Uuid, patch: ItemPatch) -> ResultEngine<Item> {
        let name = normalize_optional_text(patch.name, "name")?;
        let tax = validate_optional_amount(patch.tax, "tax")?;
        let base_amount = validate_optional_amount(patch.base_amount, "baseAmount")?;
        let discount = validate_optional_amount(patch.discount, "discount")?;

        with_tx!(self, |db_tx| {
            let current = items::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound(LABEL.to_string()))?;

            let base_amount = base_amount.unwrap_or(current.base_amount);
            let discount = discount.unwrap_or(current.discount);
            let is_tax_applicable = patch
                .is_tax_applicable
                .unwrap_or(current.is_tax_applicable);

            let mut active: items::ActiveModel = current.into();
            if let Some(sub_category_id) = patch.sub_category_id {
                Self::require_sub_category(&db_tx, sub_category_id).await?;
                active.sub_category_id = ActiveValue::Set(sub_category_id);
            }
            if let Some(name) = name {
                active.name_norm = ActiveValue::Set(fold_name(&name));
                active.name = ActiveValue::Set(name);
            }
            if let Some(description) = patch.description {
                active.description = ActiveValue::Set(description);
            }
            if let Some(image) = patch.image {
                active.image = ActiveValue::Set(image);
            }
            active.is_tax_applicable = ActiveValue::Set(is_tax_applicable);
            if let Some(tax) = tax {
                active.tax = ActiveValue::Set(tax);
            }
            if !is_tax_applicable {
                active.tax = ActiveValue::Set(0.0);
            }
            active.base_amount = ActiveValue::Set(base_amount);
            active.discount = ActiveValue::Set(discount);
            active.total_amount = ActiveValue::Set(total_amount(base_amount, discount));
            active.updated_at = ActiveValue::Set(Utc::now());

            let model = active.update(&db_tx).await?;
            Ok(Item::from(model))
        })
    }

    /// Every item of `sub_category_id`, newest first.
    pub async fn items_under_sub_category(&self, sub_category_id: Uuid) -> ResultEngine<Vec<Item>> {
        let models = items::Entity::find()
            .filter(items::Column::SubCategoryId.eq(sub_category_id))
            .order_by_desc(items::Column::CreatedAt)
            .order_by_desc(items::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Item::from).collect())
    }

    /// List items across all sub-categories, newest first.
    pub async fn list_items(&self, query: &ListQuery) -> ResultEngine<Page<Item>> {
        let mut select = items::Entity::find();
        if let Some(term) = query.search.as_deref() {
            select = select.filter(name_contains(items::Column::NameNorm, term));
        }
        let select = select
            .order_by_desc(items::Column::CreatedAt)
            .order_by_desc(items::Column::Id);

        let page = fetch_page(&self.database, select, query).await?;
        Ok(page.map(Item::from))
    }
}
