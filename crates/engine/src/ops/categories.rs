use chrono::Utc;
use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{
    Category, CategoryNew, CategoryPatch, EngineError, ListQuery, Page, ResultEngine, categories,
    pagination::{fetch_page, name_contains},
    util::fold_name,
};

use super::{
    Engine, applicable_tax, normalize_optional_text, normalize_required_text,
    validate_optional_amount, with_tx,
};

const LABEL: &str = "Category";

impl CategoryNew {
    /// Reject the values [`Engine::create_category`] would reject, without
    /// touching the store.
    pub fn validate(&self) -> ResultEngine<()> {
        normalize_required_text(&self.name, "name")?;
        validate_optional_amount(self.tax, "tax")?;
        Ok(())
    }
}

impl CategoryPatch {
    /// Reject the values [`Engine::update_category`] would reject, without
    /// touching the store.
    pub fn validate(&self) -> ResultEngine<()> {
        normalize_optional_text(self.name.clone(), "name")?;
        validate_optional_amount(self.tax, "tax")?;
        Ok(())
    }
}

impl Engine {
    /// Return the category with the given id.
    pub async fn category(&self, id: Uuid) -> ResultEngine<Category> {
        categories::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(Category::from)
            .ok_or_else(|| EngineError::KeyNotFound(LABEL.to_string()))
    }

    /// Return the category named exactly `name`, if any.
    pub async fn find_category_by_name(&self, name: &str) -> ResultEngine<Option<Category>> {
        let model = categories::Entity::find()
            .filter(categories::Column::Name.eq(name.trim()))
            .one(&self.database)
            .await?;
        Ok(model.map(Category::from))
    }

    /// Create a category.
    ///
    /// When tax is not applicable, `tax` is stored as `0` and `tax_type` as
    /// an empty string whatever the input says.
    pub async fn create_category(&self, new: CategoryNew) -> ResultEngine<Category> {
        let name = normalize_required_text(&new.name, "name")?;
        let tax = validate_optional_amount(new.tax, "tax")?.unwrap_or(0.0);
        let tax_type = if new.is_tax_applicable {
            new.tax_type.unwrap_or_default()
        } else {
            String::new()
        };

        with_tx!(self, |db_tx| {
            if Self::category_name_taken(&db_tx, &name, None).await? {
                return Err(EngineError::ExistingKey(LABEL.to_string()));
            }

            let now = Utc::now();
            let active = categories::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                name_norm: ActiveValue::Set(fold_name(&name)),
                name: ActiveValue::Set(name),
                description: ActiveValue::Set(new.description),
                image: ActiveValue::Set(new.image),
                is_tax_applicable: ActiveValue::Set(new.is_tax_applicable),
                tax: ActiveValue::Set(applicable_tax(new.is_tax_applicable, tax)),
                tax_type: ActiveValue::Set(tax_type),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            };
            let model = active
                .insert(&db_tx)
                .await
                .map_err(|err| EngineError::from_write(err, LABEL))?;
            tracing::debug!(id = %model.id, "category created");
            Ok(Category::from(model))
        })
    }

    /// Apply a partial update to a category.
    ///
    /// Renaming checks the new name against every other category. Whenever
    /// the resulting record is not taxable, `tax` and `tax_type` are reset.
    pub async fn update_category(&self, id: Uuid, patch: CategoryPatch) -> ResultEngine<Category> {
        let name = normalize_optional_text(patch.name, "name")?;
        let tax = validate_optional_amount(patch.tax, "tax")?;

        with_tx!(self, |db_tx| {
            let current = Self::require_category(&db_tx, id).await?;
            let is_tax_applicable = patch
                .is_tax_applicable
                .unwrap_or(current.is_tax_applicable);

            let mut active: categories::ActiveModel = current.into();
            if let Some(name) = name {
                if Self::category_name_taken(&db_tx, &name, Some(id)).await? {
                    return Err(EngineError::ExistingKey(LABEL.to_string()));
                }
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
            if let Some(tax_type) = patch.tax_type {
                active.tax_type = ActiveValue::Set(tax_type);
            }
            if !is_tax_applicable {
                active.tax = ActiveValue::Set(0.0);
                active.tax_type = ActiveValue::Set(String::new());
            }
            active.updated_at = ActiveValue::Set(Utc::now());

            let model = active
                .update(&db_tx)
                .await
                .map_err(|err| EngineError::from_write(err, LABEL))?;
            Ok(Category::from(model))
        })
    }

    /// List categories, newest first.
    pub async fn list_categories(&self, query: &ListQuery) -> ResultEngine<Page<Category>> {
        let mut select = categories::Entity::find();
        if let Some(term) = query.search.as_deref() {
            select = select.filter(name_contains(categories::Column::NameNorm, term));
        }
        let select = select
            .order_by_desc(categories::Column::CreatedAt)
            .order_by_desc(categories::Column::Id);

        let page = fetch_page(&self.database, select, query).await?;
        Ok(page.map(Category::from))
    }

    pub(super) async fn require_category(
        db_tx: &DatabaseTransaction,
        id: Uuid,
    ) -> ResultEngine<categories::Model> {
        categories::Entity::find_by_id(id)
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(LABEL.to_string()))
    }

    async fn category_name_taken(
        db_tx: &DatabaseTransaction,
        name: &str,
        except: Option<Uuid>,
    ) -> ResultEngine<bool> {
        let mut select = categories::Entity::find().filter(categories::Column::Name.eq(name));
        if let Some(id) = except {
            select = select.filter(categories::Column::Id.ne(id));
        }
        Ok(select.one(db_tx).await?.is_some())
    }
}
