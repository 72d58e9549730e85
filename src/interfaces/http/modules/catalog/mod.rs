pub mod dto;
pub mod handlers;

pub use dto::{CatalogItem, ItemFilter};
pub use handlers::{list_item_stream, list_items, stream_parameters, Catalog, CatalogState};
