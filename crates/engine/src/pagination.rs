//! Search and paging for the list operations.

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Select,
    sea_query::{Expr, LikeExpr, SimpleExpr},
};

use crate::{ResultEngine, util::fold_name};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 15;
/// Larger limits are clamped down to this.
pub const MAX_LIMIT: u64 = 100;

/// What a list operation should return.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    /// Case-insensitive substring matched against `name`.
    pub search: Option<String>,
    /// 1-based.
    pub page: u64,
    pub limit: u64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ListQuery {
    /// Build a query from raw request values.
    ///
    /// An empty search means no filter. A missing, non-numeric or zero page
    /// or limit falls back to the default. `limit` is capped at [`MAX_LIMIT`].
    pub fn from_raw(search: Option<&str>, page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            search: search
                .filter(|term| !term.is_empty())
                .map(ToString::to_string),
            page: positive_or(page, DEFAULT_PAGE),
            limit: positive_or(limit, DEFAULT_LIMIT).min(MAX_LIMIT),
        }
    }
}

fn positive_or(value: Option<&str>, default: u64) -> u64 {
    value
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

/// A page of results.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub docs: Vec<T>,
    pub total_docs: u64,
    pub page: u64,
    pub limit: u64,
}

impl<T> Page<T> {
    /// Never less than 1, even for an empty result.
    pub fn total_pages(&self) -> u64 {
        self.total_docs.div_ceil(self.limit.max(1)).max(1)
    }

    pub fn paging_counter(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.limit)
            .saturating_add(1)
    }

    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn prev_page(&self) -> Option<u64> {
        self.has_prev_page().then(|| self.page - 1)
    }

    pub fn next_page(&self) -> Option<u64> {
        self.has_next_page().then(|| self.page + 1)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            docs: self.docs.into_iter().map(f).collect(),
            total_docs: self.total_docs,
            page: self.page,
            limit: self.limit,
        }
    }
}

/// `column LIKE '%term%'` over a folded name column, with `term` folded the
/// same way and its LIKE wildcards taken literally.
pub(crate) fn name_contains(column: impl ColumnTrait, term: &str) -> SimpleExpr {
    let escaped = fold_name(term)
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Expr::col(column).like(LikeExpr::new(format!("%{escaped}%")).escape('\\'))
}

pub(crate) async fn fetch_page<E>(
    db: &DatabaseConnection,
    select: Select<E>,
    query: &ListQuery,
) -> ResultEngine<Page<E::Model>>
where
    E: EntityTrait,
    E::Model: Sync,
{
    let limit = query.limit.clamp(1, MAX_LIMIT);
    let page = query.page.max(1);
    let paginator = select.paginate(db, limit);
    let total_docs = paginator.num_items().await?;

    // Offsets past the last row are never sent; they may not fit an i64.
    let addressable = (page - 1)
        .checked_mul(limit)
        .is_some_and(|offset| offset <= total_docs);
    let docs = if addressable {
        paginator.fetch_page(page - 1).await?
    } else {
        Vec::new()
    };

    Ok(Page {
        docs,
        total_docs,
        page,
        limit,
    })
}
