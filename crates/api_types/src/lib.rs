use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Success wrapper returned by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    pub message: String,
}

impl<T> Envelope<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
        }
    }
}

/// Error wrapper returned by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    /// Only set when the request lacked required fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<String>,
}

pub mod page {
    use super::*;

    /// Query string accepted by the `getAll*` endpoints.
    ///
    /// Values stay raw strings: a malformed `page` or `limit` falls back to
    /// the default instead of rejecting the request.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ListParams {
        pub search: Option<String>,
        pub page: Option<String>,
        pub limit: Option<String>,
    }

    /// Query string carrying a record id, as in `?_id=...`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct IdParams {
        #[serde(rename = "_id")]
        pub id: Option<String>,
    }

    /// One page of a list endpoint plus its pagination metadata.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PageView<T> {
        pub docs: Vec<T>,
        pub total_docs: u64,
        pub limit: u64,
        pub page: u64,
        pub total_pages: u64,
        /// 1-based position of the first doc of this page in the whole result.
        pub paging_counter: u64,
        pub has_prev_page: bool,
        pub has_next_page: bool,
        pub prev_page: Option<u64>,
        pub next_page: Option<u64>,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryView {
        #[serde(rename = "_id")]
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
}

pub mod sub_category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SubCategoryView {
        #[serde(rename = "_id")]
        pub id: Uuid,
        pub category_id: Uuid,
        pub name: String,
        pub description: String,
        pub image: String,
        /// Copied from the parent category when the sub-category was created.
        pub is_tax_applicable: bool,
        pub tax: f64,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod item {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ItemView {
        #[serde(rename = "_id")]
        pub id: Uuid,
        #[serde(rename = "sub_categoryId")]
        pub sub_category_id: Uuid,
        pub name: String,
        pub description: String,
        pub image: String,
        pub is_tax_applicable: bool,
        pub tax: f64,
        pub base_amount: f64,
        pub discount: f64,
        /// Always `base_amount - discount`.
        pub total_amount: f64,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}
