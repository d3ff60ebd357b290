//! Domain layer: grid defaults, request parameters, normalization rules and
//! capability descriptors. No I/O.

pub mod grid;

pub use grid::{
    DefaultsOverride, Filterable, GridDefaults, GridState, PerPageLimit, QueryParamNames,
    RequestParams, Searchable, SortDirection, SortKey, Sortable,
};
