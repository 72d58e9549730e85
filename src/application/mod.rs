pub mod pagination;

pub use pagination::{
    compute_links, parse_limit, parse_offset, Limit, Offset, PaginationContext, ParameterDecl,
};
