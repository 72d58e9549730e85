pub mod dto;
pub mod page_request;

pub use dto::{ErrorResponse, FieldError, PaginatedResponse};
pub use page_request::{PageRequest, PaginationRejection, PublicBaseUrl};
