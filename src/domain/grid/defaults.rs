//! Grid defaults and per-endpoint overrides

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::shared::GridError;

/// Inclusive bounds for the number of rows per page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_limit"))]
pub struct PerPageLimit {
    #[validate(range(min = 1))]
    pub min: u64,
    pub max: u64,
}

impl PerPageLimit {
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Clamp a requested page size into `[min, max]`.
    pub fn clamp(&self, requested: i64) -> u64 {
        if requested < 0 {
            return self.min;
        }
        (requested as u64).clamp(self.min, self.max)
    }
}

impl Default for PerPageLimit {
    fn default() -> Self {
        Self { min: 5, max: 100 }
    }
}

fn validate_limit(limit: &PerPageLimit) -> Result<(), ValidationError> {
    if limit.min > limit.max {
        return Err(ValidationError::new("min_exceeds_max"));
    }
    Ok(())
}

/// Names under which the five grid parameters appear in the request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_distinct_names"))]
pub struct QueryParamNames {
    #[validate(length(min = 1))]
    pub page: String,
    #[validate(length(min = 1))]
    pub per_page: String,
    #[validate(length(min = 1))]
    pub search: String,
    #[validate(length(min = 1))]
    pub filter: String,
    #[validate(length(min = 1))]
    pub sort: String,
}

impl QueryParamNames {
    pub fn all(&self) -> [&str; 5] {
        [
            &self.page,
            &self.per_page,
            &self.search,
            &self.filter,
            &self.sort,
        ]
    }
}

impl Default for QueryParamNames {
    fn default() -> Self {
        Self {
            page: "page".to_string(),
            per_page: "perPage".to_string(),
            search: "search".to_string(),
            filter: "filter".to_string(),
            sort: "sort".to_string(),
        }
    }
}

fn validate_distinct_names(names: &QueryParamNames) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    if names.all().iter().all(|name| seen.insert(*name)) {
        Ok(())
    } else {
        Err(ValidationError::new("duplicate_query_param_name"))
    }
}

/// Defaults applied when a request omits or garbles a grid parameter.
///
/// Loaded from the `[grid]` section of the application config and shared by
/// every endpoint unless overridden with [`DefaultsOverride`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GridDefaults {
    #[validate(range(min = 1))]
    pub page: u64,
    pub per_page: u64,
    #[validate(nested)]
    pub per_page_limit: PerPageLimit,
    pub search: String,
    pub filters: BTreeMap<String, String>,
    pub sorts: String,
    #[validate(nested)]
    pub query_params: QueryParamNames,
}

impl Default for GridDefaults {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 25,
            per_page_limit: PerPageLimit::default(),
            search: String::new(),
            filters: BTreeMap::new(),
            sorts: String::new(),
            query_params: QueryParamNames::default(),
        }
    }
}

impl GridDefaults {
    /// Shallow merge: every field set in `overrides` replaces ours.
    pub fn merged(&self, overrides: &DefaultsOverride) -> Self {
        Self {
            page: overrides.page.unwrap_or(self.page),
            per_page: overrides.per_page.unwrap_or(self.per_page),
            per_page_limit: overrides.per_page_limit.unwrap_or(self.per_page_limit),
            search: overrides
                .search
                .clone()
                .unwrap_or_else(|| self.search.clone()),
            filters: overrides
                .filters
                .clone()
                .unwrap_or_else(|| self.filters.clone()),
            sorts: overrides.sorts.clone().unwrap_or_else(|| self.sorts.clone()),
            query_params: overrides
                .query_params
                .clone()
                .unwrap_or_else(|| self.query_params.clone()),
        }
    }

    pub fn check(&self) -> Result<(), GridError> {
        self.validate()
            .map_err(|e| GridError::InvalidDefaults(e.to_string()))
    }
}

/// Per-endpoint partial override of [`GridDefaults`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsOverride {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub per_page_limit: Option<PerPageLimit>,
    pub search: Option<String>,
    pub filters: Option<BTreeMap<String, String>>,
    pub sorts: Option<String>,
    pub query_params: Option<QueryParamNames>,
}
