//! Offset pagination: parameter validation, context resolution and links.

pub mod context;
pub mod links;
pub mod parameters;

pub use context::{PaginationContext, ParameterDecl};
pub use links::{compute_links, last_offset, next_page, paginated_url, NextPage};
pub use parameters::{
    parse_limit, parse_offset, Limit, Offset, DEFAULT_LIMIT, DEFAULT_OFFSET, MAX_LIMIT, MAX_OFFSET,
    MIN_LIMIT,
};
