pub mod grid;

pub use grid::{DataGrid, ExportField, ExportOptions, Grid, GridBuilder};
