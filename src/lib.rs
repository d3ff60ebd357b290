//! # Data Grid Service
//!
//! Request-driven query builder for list endpoints: one declaration per
//! endpoint says which fields are searchable, filterable and sortable, and
//! the grid turns a request's query string into a constrained sea-orm query,
//! paginated or exported as CSV.
//!
//! ## Architecture
//!
//! - **domain**: grid defaults, request parameters, normalization, descriptors
//! - **application**: `GridBuilder`, `Grid`, `DataGrid`, CSV export
//! - **infrastructure**: database connection, migrations, demo entity and seed
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: service lifecycle and tracing setup

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use application::{DataGrid, ExportField, ExportOptions, Grid, GridBuilder};
pub use domain::{DefaultsOverride, Filterable, GridDefaults, RequestParams, Searchable, Sortable};

pub use infrastructure::{init_database, DatabaseConfig};

pub use interfaces::http::create_api_router;

pub use shared::{AppError, AppResult, GridError, PaginatedResult};
