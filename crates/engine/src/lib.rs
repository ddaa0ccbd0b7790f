//! Catalog engine: the persistence layer and the per-resource operations.
//!
//! Every public operation lives on [`Engine`]. The sea-orm entities are
//! exposed for the migration tests and for callers that need raw access.

pub use categories::{Category, CategoryNew, CategoryPatch};
pub use error::EngineError;
pub use items::{Item, ItemNew, ItemPatch};
pub use ops::{Engine, EngineBuilder};
pub use pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, ListQuery, MAX_LIMIT, Page};
pub use sub_categories::{SubCategory, SubCategoryNew, SubCategoryPatch};

pub mod categories;
mod error;
pub mod items;
mod ops;
mod pagination;
pub mod sub_categories;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
