//! Common API DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{PaginatedPage, PaginationError, PaginationLinks};

/// Paginated list response
///
/// Items of the current page, the completeness signals reported by the data
/// source and the navigation links. Absent values serialize as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// Items on the current page
    pub items: Vec<T>,
    /// Whether another page follows; `null` when unknown
    pub has_more: Option<bool>,
    /// Total number of items across all pages; `null` when unknown
    pub total_results: Option<u64>,
    /// Link to the first page
    pub first_link: String,
    /// Link to the last page; `null` without a total
    pub last_link: Option<String>,
    /// Link to the previous page; `null` on the first page
    pub prev_link: Option<String>,
    /// Link to the next page; `null` when there is none
    pub next_link: Option<String>,
}

impl<T> PaginatedResponse<T> {
    pub fn new(page: PaginatedPage<T>, links: PaginationLinks) -> Self {
        let has_more = page.has_more();
        let total_results = page.total_results();
        Self {
            items: page.into_items(),
            has_more,
            total_results,
            first_link: links.first,
            last_link: links.last,
            prev_link: links.prev,
            next_link: links.next,
        }
    }
}

/// Field-level validation detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Query parameter the detail refers to
    pub field: String,
    /// Failure class: `type`, `value` or `format`
    pub code: String,
    pub message: String,
}

/// Error body; `code` mirrors the HTTP status (400, or 500 for invalid
/// parameter declarations)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    pub errors: Vec<FieldError>,
}

impl From<&PaginationError> for ErrorResponse {
    fn from(err: &PaginationError) -> Self {
        let errors = match err {
            PaginationError::InvalidParameter(param) => vec![FieldError {
                field: param.field().to_string(),
                code: param.failure().as_str().to_string(),
                message: param.message().to_string(),
            }],
            _ => Vec::new(),
        };

        Self {
            code: err.status_code(),
            message: err.to_string(),
            errors,
        }
    }
}
