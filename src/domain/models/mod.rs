pub mod page;

pub use page::{PageWindow, PaginatedPage, PaginationLinks};
