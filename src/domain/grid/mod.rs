//! Grid domain: defaults, raw request parameters, validation, sort parsing
//! and capability descriptors.

pub mod defaults;
pub mod descriptor;
pub mod params;
pub mod sort;
pub mod state;
pub mod validate;

pub use defaults::{DefaultsOverride, GridDefaults, PerPageLimit, QueryParamNames};
pub use descriptor::{ConditionFn, Filterable, Searchable, SortFn, Sortable};
pub use params::RequestParams;
pub use sort::{parse_sorts, SortDirection, SortKey};
pub use state::GridState;
pub use validate::{
    validate_filters, validate_page, validate_per_page, validate_search, validate_sorts,
};
