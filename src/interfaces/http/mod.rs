//! HTTP REST API interfaces
//!
//! - `common`: pagination extractor, response envelope and error body
//! - `modules`: request handlers per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::create_api_router;
