use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{
        HeaderName, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, post, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use std::sync::Arc;

use crate::{ServerError, category, item, media::MediaUploader, messages, sub_category};
use engine::Engine;

pub const API_PREFIX: &str = "/api/v1";

/// 10 MiB, enough for a product photo.
pub const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;

fn token_header() -> HeaderName {
    HeaderName::from_static("token")
}

/// Shared by every handler. Cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub media: Arc<dyn MediaUploader>,
    /// Largest accepted request body, in bytes.
    pub body_limit: usize,
}

impl ServerState {
    pub fn new(engine: Engine, media: Arc<dyn MediaUploader>) -> Self {
        Self {
            engine: Arc::new(engine),
            media,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION, token_header()])
        .expose_headers([token_header(), AUTHORIZATION])
}

async fn fallback() -> ServerError {
    ServerError::NotFound(messages::ROUTE_NOT_FOUND.to_string())
}

fn api() -> Router<ServerState> {
    let categories = Router::new()
        .route("/createCategory", post(category::create))
        .route("/getCategory", get(category::get))
        .route("/editCategory", put(category::edit))
        .route("/getAllCategory", get(category::list));

    let sub_categories = Router::new()
        .route("/createSubCategory", post(sub_category::create))
        .route("/getSubCategory", get(sub_category::get))
        .route(
            "/subCategoryUnderCategory/{_id}",
            get(sub_category::under_category),
        )
        .route("/editSubcategory", put(sub_category::edit))
        .route("/getAllSubCategory", get(sub_category::list));

    let items = Router::new()
        .route("/createItem", post(item::create))
        .route("/getItem/{_id}", get(item::get))
        .route(
            "/getItemsUnderSubCategory/{_id}",
            get(item::under_sub_category),
        )
        .route("/editItem", put(item::edit))
        .route("/getAllItem", get(item::list));

    Router::new()
        .nest("/category", categories)
        .nest("/subcategory", sub_categories)
        .nest("/item", items)
}

/// Build the application router with its middleware stack.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .nest(API_PREFIX, api())
        .fallback(fallback)
        .layer(DefaultBodyLimit::max(state.body_limit))
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(state, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
