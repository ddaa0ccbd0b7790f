use chrono::Utc;
use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{
    EngineError, ListQuery, Page, ResultEngine, SubCategory, SubCategoryNew, SubCategoryPatch,
    pagination::{fetch_page, name_contains},
    sub_categories,
    util::fold_name,
};

use super::{
    Engine, normalize_optional_text, normalize_required_text, validate_optional_amount, with_tx,
};

const LABEL: &str = "Sub category";

impl SubCategoryNew {
    /// Reject the values [`Engine::create_sub_category`] would reject,
    /// without touching the store.
    pub fn validate(&self) -> ResultEngine<()> {
        normalize_required_text(&self.name, "name").map(|_| ())
    }
}

impl SubCategoryPatch {
    pub fn validate(&self) -> ResultEngine<()> {
        normalize_optional_text(self.name.clone(), "name")?;
        validate_optional_amount(self.tax, "tax")?;
        Ok(())
    }
}

impl Engine {
    /// Return the sub-category with the given id.
    pub async fn sub_category(&self, id: Uuid) -> ResultEngine<SubCategory> {
        sub_categories::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(SubCategory::from)
            .ok_or_else(|| EngineError::KeyNotFound(LABEL.to_string()))
    }

    /// Create a sub-category under an existing category.
    ///
    /// `is_tax_applicable` and `tax` are copied from the parent as they are
    /// right now; nothing keeps them in sync afterwards.
    pub async fn create_sub_category(&self, new: SubCategoryNew) -> ResultEngine<SubCategory> {
        let name = normalize_required_text(&new.name, "name")?;

        with_tx!(self, |db_tx| {
            let parent = Self::require_category(&db_tx, new.category_id).await?;

            let now = Utc::now();
            let active = sub_categories::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                category_id: ActiveValue::Set(parent.id),
                name_norm: ActiveValue::Set(fold_name(&name)),
                name: ActiveValue::Set(name),
                description: ActiveValue::Set(new.description),
                image: ActiveValue::Set(new.image),
                is_tax_applicable: ActiveValue::Set(parent.is_tax_applicable),
                tax: ActiveValue::Set(parent.tax),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            };
            let model = active.insert(&db_tx).await?;
            tracing::debug!(id = %model.id, category_id = %parent.id, "sub category created");
            Ok(SubCategory::from(model))
        })
    }

    /// Apply a partial update to a sub-category.
    ///
    /// Moving it to another category requires that category to exist; the
    /// tax fields are not copied again. `tax` is reset whenever the
    /// resulting record is not taxable.
    pub async fn update_sub_category(
        &self,
        id: Uuid,
        patch: SubCategoryPatch,
    ) -> ResultEngine<SubCategory> {
        let name = normalize_optional_text(patch.name, "name")?;
        let tax = validate_optional_amount(patch.tax, "tax")?;

        with_tx!(self, |db_tx| {
            let current = Self::require_sub_category(&db_tx, id).await?;
            let is_tax_applicable = patch
                .is_tax_applicable
                .unwrap_or(current.is_tax_applicable);

            let mut active: sub_categories::ActiveModel = current.into();
            if let Some(category_id) = patch.category_id {
                Self::require_category(&db_tx, category_id).await?;
                active.category_id = ActiveValue::Set(category_id);
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
            active.updated_at = ActiveValue::Set(Utc::now());

            let model = active.update(&db_tx).await?;
            Ok(SubCategory::from(model))
        })
    }

    /// Every sub-category of `category_id`, newest first.
    pub async fn sub_categories_under_category(
        &self,
        category_id: Uuid,
    ) -> ResultEngine<Vec<SubCategory>> {
        let models = sub_categories::Entity::find()
            .filter(sub_categories::Column::CategoryId.eq(category_id))
            .order_by_desc(sub_categories::Column::CreatedAt)
            .order_by_desc(sub_categories::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(SubCategory::from).collect())
    }

    /// List sub-categories across all categories, newest first.
    pub async fn list_sub_categories(&self, query: &ListQuery) -> ResultEngine<Page<SubCategory>> {
        let mut select = sub_categories::Entity::find();
        if let Some(term) = query.search.as_deref() {
            select = select.filter(name_contains(sub_categories::Column::NameNorm, term));
        }
        let select = select
            .order_by_desc(sub_categories::Column::CreatedAt)
            .order_by_desc(sub_categories::Column::Id);

        let page = fetch_page(&self.database, select, query).await?;
        Ok(page.map(SubCategory::from))
    }

    pub(super) async fn require_sub_category(
        db_tx: &DatabaseTransaction,
        id: Uuid,
    ) -> ResultEngine<sub_categories::Model> {
        sub_categories::Entity::find_by_id(id)
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(LABEL.to_string()))
    }
}
