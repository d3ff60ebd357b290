pub mod builder;
pub mod export;
pub mod service;

pub use builder::{Grid, GridBuilder, Prepared, QueryFn};
pub use export::{rows_to_csv, ExportField, ExportOptions};
pub use service::DataGrid;
