//! Catalog API handlers
//!
//! Two listings over the same in-memory catalog: one reports a total count,
//! the other only whether more items follow and uses renamed
//! `start`/`pagesize` pagination parameters.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use super::dto::{CatalogItem, ItemFilter};
use crate::application::pagination::ParameterDecl;
use crate::domain::{PaginatedPage, ParameterKind};
use crate::interfaces::http::common::{
    ErrorResponse, PageRequest, PaginatedResponse, PaginationRejection,
};

const CATEGORIES: [&str; 3] = ["garden", "kitchen", "tools"];

/// In-memory item source
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    /// Catalog of `count` generated items.
    pub fn sample(count: u32) -> Self {
        let items = (1..=count)
            .map(|id| CatalogItem {
                id,
                name: format!("Item {:03}", id),
                category: CATEGORIES[id as usize % CATEGORIES.len()].to_string(),
            })
            .collect();
        Self::new(items)
    }

    pub fn search<'a>(&'a self, filter: &'a ItemFilter) -> impl Iterator<Item = &'a CatalogItem> {
        let needle = filter.q.as_deref().map(str::to_lowercase);
        self.items.iter().filter(move |item| {
            let name_matches = needle
                .as_deref()
                .map_or(true, |q| item.name.to_lowercase().contains(q));
            let category_matches = filter
                .category
                .as_deref()
                .map_or(true, |c| item.category == c);
            name_matches && category_matches
        })
    }
}

/// Catalog handler state
#[derive(Clone)]
pub struct CatalogState {
    pub catalog: Arc<Catalog>,
}

/// Declared parameters of [`list_item_stream`].
pub fn stream_parameters() -> Vec<ParameterDecl> {
    vec![
        ParameterDecl::query("q"),
        ParameterDecl::query("category"),
        ParameterDecl::query("start")
            .with_default("0")
            .marked_as(ParameterKind::Offset),
        ParameterDecl::query("pagesize")
            .with_default("10")
            .marked_as(ParameterKind::Limit),
    ]
}

fn skip_count(page: &PageRequest) -> usize {
    usize::try_from(page.offset()).unwrap_or(usize::MAX)
}

#[utoipa::path(
    get,
    path = "/api/v1/items",
    tag = "Catalog",
    params(
        ItemFilter,
        ("offset" = Option<u64>, Query, description = "Items to skip (>= 0). Default: 0"),
        ("limit" = Option<u32>, Query, description = "Page size (1–100). Default: 20")
    ),
    responses(
        (status = 200, description = "Item page with totalResults", body = PaginatedResponse<CatalogItem>),
        (status = 400, description = "Invalid offset or limit", body = ErrorResponse)
    )
)]
pub async fn list_items(
    State(state): State<CatalogState>,
    Query(filter): Query<ItemFilter>,
    page: PageRequest,
) -> Result<Json<PaginatedResponse<CatalogItem>>, PaginationRejection> {
    let total = state.catalog.search(&filter).count() as u64;
    let items: Vec<CatalogItem> = state
        .catalog
        .search(&filter)
        .skip(skip_count(&page))
        .take(page.limit() as usize)
        .cloned()
        .collect();

    tracing::debug!(
        offset = page.offset(),
        limit = page.limit(),
        total,
        returned = items.len(),
        "listing catalog items"
    );

    page.respond(PaginatedPage::counted(items, total))
}

#[utoipa::path(
    get,
    path = "/api/v1/items/stream",
    tag = "Catalog",
    params(
        ItemFilter,
        ("start" = Option<u64>, Query, description = "Items to skip (>= 0). Default: 0"),
        ("pagesize" = Option<u32>, Query, description = "Page size (1–100). Default: 10")
    ),
    responses(
        (status = 200, description = "Item page with hasMore", body = PaginatedResponse<CatalogItem>),
        (status = 400, description = "Invalid start or pagesize", body = ErrorResponse)
    )
)]
pub async fn list_item_stream(
    State(state): State<CatalogState>,
    Query(filter): Query<ItemFilter>,
    page: PageRequest,
) -> Result<Json<PaginatedResponse<CatalogItem>>, PaginationRejection> {
    let limit = page.limit() as usize;
    // One extra item tells whether another page follows without counting.
    let mut items: Vec<CatalogItem> = state
        .catalog
        .search(&filter)
        .skip(skip_count(&page))
        .take(limit.saturating_add(1))
        .cloned()
        .collect();
    let has_more = items.len() > limit;
    items.truncate(limit);

    page.respond(PaginatedPage::open_ended(items, has_more))
}
