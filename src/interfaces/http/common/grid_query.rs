//! Query-string extractor feeding grids
//!
//! Grids read their parameters from a flat bag with bracket notation for
//! filters (`filter[role]=admin`). Malformed query strings are never a client
//! error here: the grid normalizes missing or odd values to its defaults.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;
use tracing::warn;
use utoipa::IntoParams;

use crate::domain::grid::RequestParams;

/// Raw grid parameters of the current request.
#[derive(Debug, Clone, Default)]
pub struct GridQuery(pub RequestParams);

impl<S> FromRequestParts<S> for GridQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = match Query::<Vec<(String, String)>>::try_from_uri(&parts.uri) {
            Ok(Query(pairs)) => pairs,
            Err(e) => {
                warn!("Ignoring unparseable query string {:?}: {}", parts.uri.query(), e);
                Vec::new()
            }
        };
        Ok(Self(RequestParams::from_pairs(pairs)))
    }
}

/// Grid query parameters, for the API documentation.
///
/// Names are the defaults and may be renamed per deployment.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GridQueryParams {
    /// Page number, starting at 1
    pub page: Option<u64>,
    /// Rows per page, clamped to the configured bounds
    #[serde(rename = "perPage")]
    pub per_page: Option<u64>,
    /// Free text matched against the searchable fields
    pub search: Option<String>,
    /// Equality filters, e.g. `filter[role]=admin`
    #[param(style = DeepObject, explode, value_type = Option<Object>)]
    pub filter: Option<HashMap<String, String>>,
    /// Comma-separated sort keys, `-` prefix for descending, e.g. `-age,username`
    pub sort: Option<String>,
}
