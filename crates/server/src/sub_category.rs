//! Sub-category endpoints.

use api_types::{
    Envelope,
    page::{IdParams, ListParams, PageView},
    sub_category::SubCategoryView,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use engine::{ListQuery, SubCategoryNew, SubCategoryPatch};

use crate::{
    ServerError,
    form::{FormData, IMAGE_FIELD, parse_id},
    messages, page_view,
    server::ServerState,
};

fn map_sub_category(sub_category: engine::SubCategory) -> SubCategoryView {
    SubCategoryView {
        id: sub_category.id,
        category_id: sub_category.category_id,
        name: sub_category.name,
        description: sub_category.description,
        image: sub_category.image,
        is_tax_applicable: sub_category.is_tax_applicable,
        tax: sub_category.tax,
        created_at: sub_category.created_at,
        updated_at: sub_category.updated_at,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    mut form: FormData,
) -> Result<Json<Envelope<SubCategoryView>>, ServerError> {
    form.require(&["categoryId", "name", "description", IMAGE_FIELD])?;

    let new = SubCategoryNew {
        category_id: form.required_id("categoryId")?,
        name: form.required_text("name")?,
        description: form.required_text("description")?,
        image: String::new(),
    };
    new.validate()?;

    // Fail before spending an upload on an orphan.
    state.engine.category(new.category_id).await?;

    let file = form
        .take_file()
        .ok_or_else(|| ServerError::MissingFields(vec![IMAGE_FIELD.to_string()]))?;
    let image = state.media.upload(file).await?;

    let sub_category = state
        .engine
        .create_sub_category(SubCategoryNew { image, ..new })
        .await?;

    Ok(Json(Envelope::new(
        map_sub_category(sub_category),
        messages::SUB_CATEGORY_CREATED,
    )))
}

pub async fn get(
    State(state): State<ServerState>,
    Query(params): Query<IdParams>,
) -> Result<Json<Envelope<SubCategoryView>>, ServerError> {
    let raw = params
        .id
        .ok_or_else(|| ServerError::MissingFields(vec!["_id".to_string()]))?;
    let id = parse_id(&raw, "_id")?;

    let sub_category = state.engine.sub_category(id).await?;
    Ok(Json(Envelope::new(
        map_sub_category(sub_category),
        messages::DATA_FOUND,
    )))
}

pub async fn under_category(
    State(state): State<ServerState>,
    Path(raw): Path<String>,
) -> Result<Json<Envelope<Vec<SubCategoryView>>>, ServerError> {
    let category_id = parse_id(&raw, "_id")?;

    let sub_categories = state
        .engine
        .sub_categories_under_category(category_id)
        .await?;
    if sub_categories.is_empty() {
        return Err(ServerError::NotFound(messages::DATA_NOT_FOUND.to_string()));
    }

    Ok(Json(Envelope::new(
        sub_categories.into_iter().map(map_sub_category).collect(),
        messages::DATA_FOUND,
    )))
}

pub async fn edit(
    State(state): State<ServerState>,
    mut form: FormData,
) -> Result<Json<Envelope<SubCategoryView>>, ServerError> {
    form.require(&["_id"])?;
    let id = form.required_id("_id")?;

    let patch = SubCategoryPatch {
        category_id: form.id("categoryId")?,
        name: form.text("name"),
        description: form.text("description"),
        image: None,
        is_tax_applicable: form.flag("isTaxApplicable")?,
        tax: form.number("tax")?,
    };
    patch.validate()?;

    state.engine.sub_category(id).await?;
    if let Some(category_id) = patch.category_id {
        state.engine.category(category_id).await?;
    }

    let image = match form.take_file() {
        Some(file) => Some(state.media.upload(file).await?),
        None => None,
    };

    let sub_category = state
        .engine
        .update_sub_category(id, SubCategoryPatch { image, ..patch })
        .await?;

    Ok(Json(Envelope::new(
        map_sub_category(sub_category),
        messages::SUB_CATEGORY_UPDATED,
    )))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Envelope<PageView<SubCategoryView>>>, ServerError> {
    let query = ListQuery::from_raw(
        params.search.as_deref(),
        params.page.as_deref(),
        params.limit.as_deref(),
    );

    let page = state.engine.list_sub_categories(&query).await?;
    Ok(Json(Envelope::new(
        page_view(page, map_sub_category)?,
        messages::DATA_FOUND,
    )))
}
