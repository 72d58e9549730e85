//! Catalog DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CatalogItem {
    pub id: u32,
    pub name: String,
    pub category: String,
}

/// Filters for catalog listings. Pagination parameters are read separately.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemFilter {
    /// Case-insensitive substring of the item name
    pub q: Option<String>,
    /// Exact category
    pub category: Option<String>,
}
