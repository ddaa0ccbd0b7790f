//! Category endpoints.

use api_types::{
    Envelope,
    category::CategoryView,
    page::{IdParams, ListParams, PageView},
};
use axum::{
    Json,
    extract::{Query, State},
};
use engine::{CategoryNew, CategoryPatch, EngineError, ListQuery};

use crate::{
    ServerError,
    form::{FormData, IMAGE_FIELD, parse_id},
    messages, page_view,
    server::ServerState,
};

fn map_category(category: engine::Category) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name,
        description: category.description,
        image: category.image,
        is_tax_applicable: category.is_tax_applicable,
        tax: category.tax,
        tax_type: category.tax_type,
        created_at: category.created_at,
        updated_at: category.updated_at,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    mut form: FormData,
) -> Result<Json<Envelope<CategoryView>>, ServerError> {
    form.require(&["name", "description", "isTaxApplicable", IMAGE_FIELD])?;

    let new = CategoryNew {
        name: form.required_text("name")?,
        description: form.required_text("description")?,
        image: String::new(),
        is_tax_applicable: form.required_flag("isTaxApplicable")?,
        tax: form.number("tax")?,
        tax_type: form.text("taxType"),
    };
    new.validate()?;

    if state.engine.find_category_by_name(&new.name).await?.is_some() {
        return Err(EngineError::ExistingKey("Category".to_string()).into());
    }

    let file = form
        .take_file()
        .ok_or_else(|| ServerError::MissingFields(vec![IMAGE_FIELD.to_string()]))?;
    let image = state.media.upload(file).await?;

    let category = state
        .engine
        .create_category(CategoryNew { image, ..new })
        .await?;

    Ok(Json(Envelope::new(
        map_category(category),
        messages::CATEGORY_CREATED,
    )))
}

pub async fn get(
    State(state): State<ServerState>,
    Query(params): Query<IdParams>,
) -> Result<Json<Envelope<CategoryView>>, ServerError> {
    let raw = params
        .id
        .ok_or_else(|| ServerError::MissingFields(vec!["_id".to_string()]))?;
    let id = parse_id(&raw, "_id")?;

    let category = state.engine.category(id).await?;
    Ok(Json(Envelope::new(
        map_category(category),
        messages::DATA_FOUND,
    )))
}

pub async fn edit(
    State(state): State<ServerState>,
    mut form: FormData,
) -> Result<Json<Envelope<CategoryView>>, ServerError> {
    form.require(&["_id"])?;
    let id = form.required_id("_id")?;

    let patch = CategoryPatch {
        name: form.text("name"),
        description: form.text("description"),
        image: None,
        is_tax_applicable: form.flag("isTaxApplicable")?,
        tax: form.number("tax")?,
        tax_type: form.text("taxType"),
    };
    patch.validate()?;

    state.engine.category(id).await?;
    if let Some(name) = patch.name.as_deref()
        && let Some(existing) = state.engine.find_category_by_name(name).await?
        && existing.id != id
    {
        return Err(EngineError::ExistingKey("Category".to_string()).into());
    }

    let image = match form.take_file() {
        Some(file) => Some(state.media.upload(file).await?),
        None => None,
    };

    let category = state
        .engine
        .update_category(id, CategoryPatch { image, ..patch })
        .await?;

    Ok(Json(Envelope::new(
        map_category(category),
        messages::CATEGORY_UPDATED,
    )))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Envelope<PageView<CategoryView>>>, ServerError> {
    let query = ListQuery::from_raw(
        params.search.as_deref(),
        params.page.as_deref(),
        params.limit.as_deref(),
    );

    let page = state.engine.list_categories(&query).await?;
    Ok(Json(Envelope::new(
        page_view(page, map_category)?,
        messages::DATA_FOUND,
    )))
}
