//! Item endpoints.

use api_types::{
    Envelope,
    item::ItemView,
    page::{ListParams, PageView},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use engine::{ItemNew, ItemPatch, ListQuery};

use crate::{
    ServerError,
    form::{FormData, IMAGE_FIELD, parse_id},
    messages, page_view,
    server::ServerState,
};

const SUB_CATEGORY_ID: &str = "sub_categoryId";

fn map_item(item: engine::Item) -> ItemView {
    ItemView {
        id: item.id,
        sub_category_id: item.sub_category_id,
        name: item.name,
        description: item.description,
        image: item.image,
        is_tax_applicable: item.is_tax_applicable,
        tax: item.tax,
        base_amount: item.base_amount,
        discount: item.discount,
        total_amount: item.total_amount,
        created_at: item.created_at,
        updated_at: item.updated_at,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    mut form: FormData,
) -> Result<Json<Envelope<ItemView>>, ServerError> {
    form.require(&[
        SUB_CATEGORY_ID,
        "name",
        "description",
        "isTaxApplicable",
        "baseAmount",
        "discount",
        IMAGE_FIELD,
    ])?;

    let new = ItemNew {
        sub_category_id: form.required_id(SUB_CATEGORY_ID)?,
        name: form.required_text("name")?,
        description: form.required_text("description")?,
        image: String::new(),
        is_tax_applicable: form.required_flag("isTaxApplicable")?,
        tax: form.number("tax")?,
        base_amount: form.required_number("baseAmount")?,
        discount: form.required_number("discount")?,
    };
    new.validate()?;

    state.engine.sub_category(new.sub_category_id).await?;

    let file = form
        .take_file()
        .ok_or_else(|| ServerError::MissingFields(vec![IMAGE_FIELD.to_string()]))?;
    let image = state.media.upload(file).await?;

    let item = state.engine.create_item(ItemNew { image, ..new }).await?;

    Ok(Json(Envelope::new(map_item(item), messages::ITEM_CREATED)))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(raw): Path<String>,
) -> Result<Json<Envelope<ItemView>>, ServerError> {
    let id = parse_id(&raw, "_id")?;

    let item = state.engine.item(id).await?;
    Ok(Json(Envelope::new(map_item(item), messages::DATA_FOUND)))
}

pub async fn under_sub_category(
    State(state): State<ServerState>,
    Path(raw): Path<String>,
) -> Result<Json<Envelope<Vec<ItemView>>>, ServerError> {
    let sub_category_id = parse_id(&raw, "_id")?;

    let items = state
        .engine
        .items_under_sub_category(sub_category_id)
        .await?;
    if items.is_empty() {
        return Err(ServerError::NotFound(messages::DATA_NOT_FOUND.to_string()));
    }

    Ok(Json(Envelope::new(
        items.into_iter().map(map_item).collect(),
        messages::DATA_FOUND,
    )))
}

pub async fn edit(
    State(state): State<ServerState>,
    mut form: FormData,
) -> Result<Json<Envelope<ItemView>>, ServerError> {
    form.require(&["_id"])?;
    let id = form.required_id("_id")?;

    let patch = ItemPatch {
        sub_category_id: form.id(SUB_CATEGORY_ID)?,
        name: form.text("name"),
        description: form.text("description"),
        image: None,
        is_tax_applicable: form.flag("isTaxApplicable")?,
        tax: form.number("tax")?,
        base_amount: form.number("baseAmount")?,
        discount: form.number("discount")?,
    };
    patch.validate()?;

    state.engine.item(id).await?;
    if let Some(sub_category_id) = patch.sub_category_id {
        state.engine.sub_category(sub_category_id).await?;
    }

    let image = match form.take_file() {
        Some(file) => Some(state.media.upload(file).await?),
        None => None,
    };

    let item = state
        .engine
        .update_item(id, ItemPatch { image, ..patch })
        .await?;

    Ok(Json(Envelope::new(map_item(item), messages::ITEM_UPDATED)))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Envelope<PageView<ItemView>>>, ServerError> {
    let query = ListQuery::from_raw(
        params.search.as_deref(),
        params.page.as_deref(),
        params.limit.as_deref(),
    );

    let page = state.engine.list_items(&query).await?;
    Ok(Json(Envelope::new(
        page_view(page, map_item)?,
        messages::DATA_FOUND,
    )))
}
