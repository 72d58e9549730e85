pub mod models;

pub use models::{PageWindow, PaginatedPage, PaginationLinks};

// Re-export pagination errors from support for convenience
pub use crate::support::errors::{
    ContextError, FailureKind, PaginationError, ParameterError, ParameterKind,
};
