//! HTTP REST API interfaces
//!
//! - `common`: response envelopes, the grid query extractor, error mapping
//! - `modules`: users grid endpoints, health, metrics, request IDs
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::create_api_router;
