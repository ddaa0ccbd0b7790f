use api_types::{ErrorBody, page::PageView};
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::{EngineError, Page};

pub use media::{CloudinaryConfig, CloudinaryUploader, MediaError, MediaUploader, UploadedFile};
pub use server::{
    API_PREFIX, DEFAULT_BODY_LIMIT, ServerState, router, run_with_listener, spawn_with_listener,
};

mod category;
mod form;
mod item;
mod media;
mod messages;
mod server;
mod sub_category;

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    /// Required fields absent from the request, all of them.
    MissingFields(Vec<String>),
    /// Any other bad request.
    Generic(String),
    NotFound(String),
    Upload(MediaError),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            messages::SOMETHING_WENT_WRONG.to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let mut missing_fields = Vec::new();
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::MissingFields(fields) => {
                let message = format!("Missing required fields: {}", fields.join(", "));
                missing_fields = fields;
                (StatusCode::BAD_REQUEST, message)
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
            ServerError::NotFound(err) => (StatusCode::NOT_FOUND, err),
            ServerError::Upload(err) => {
                tracing::error!("image upload failed: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    messages::SOMETHING_WENT_WRONG.to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                error,
                missing_fields,
            }),
        )
            .into_response()
    }
}

/// Convert an engine page into its wire form. An empty page is a 404.
fn page_view<T, U>(page: Page<T>, map: impl FnMut(T) -> U) -> Result<PageView<U>, ServerError> {
    if page.docs.is_empty() {
        return Err(ServerError::NotFound(messages::DATA_NOT_FOUND.to_string()));
    }

    let total_pages = page.total_pages();
    let paging_counter = page.paging_counter();
    let has_prev_page = page.has_prev_page();
    let has_next_page = page.has_next_page();
    let prev_page = page.prev_page();
    let next_page = page.next_page();

    Ok(PageView {
        total_docs: page.total_docs,
        limit: page.limit,
        page: page.page,
        total_pages,
        paging_counter,
        has_prev_page,
        has_next_page,
        prev_page,
        next_page,
        docs: page.docs.into_iter().map(map).collect(),
    })
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<MediaError> for ServerError {
    fn from(value: MediaError) -> Self {
        Self::Upload(value)
    }
}
