//! # Offset Pagination
//!
//! Navigation links (first/prev/next/last) and `offset`/`limit` validation for
//! offset-paginated HTTP list responses.
//!
//! ## Architecture
//!
//! - **domain**: Page, window and link value types
//! - **application**: Parameter validation, pagination context resolution
//!   and link calculation
//! - **interfaces**: Axum extractor, response envelope and the demo REST API
//! - **support**: Error types and shutdown handling
//! - **config**: TOML configuration

pub mod application;
pub mod config;
pub mod domain;
pub mod interfaces;
pub mod support;

pub use config::{default_config_path, AppConfig};

// Re-export the pagination core
pub use application::pagination::{
    compute_links, parse_limit, parse_offset, Limit, Offset, PaginationContext, ParameterDecl,
};
pub use domain::{
    PageWindow, PaginatedPage, PaginationError, PaginationLinks, ParameterError, ParameterKind,
};

// Re-export the HTTP adapter
pub use interfaces::http::common::{
    ErrorResponse, PageRequest, PaginatedResponse, PaginationRejection,
};
pub use interfaces::http::create_api_router;
