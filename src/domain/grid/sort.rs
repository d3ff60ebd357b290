//! Sort specification parsing

use std::fmt;

use sea_orm::Order;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn is_desc(&self) -> bool {
        matches!(self, Self::Desc)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

/// One `field` / `-field` token of a sort specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        let (field, direction) = match token.strip_prefix('-') {
            Some(field) => (field, SortDirection::Desc),
            None => (token, SortDirection::Asc),
        };
        if field.is_empty() {
            return None;
        }
        Some(Self::new(field, direction))
    }
}

/// Split `"-age,name"` into ordered sort keys. Empty tokens are skipped.
pub fn parse_sorts(raw: &str) -> Vec<SortKey> {
    raw.split(',').filter_map(SortKey::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_dash_means_descending() {
        assert_eq!(
            parse_sorts("-age,name"),
            vec![
                SortKey::new("age", SortDirection::Desc),
                SortKey::new("name", SortDirection::Asc),
            ]
        );
    }

    #[test]
    fn blank_and_bare_dash_tokens_are_skipped() {
        assert_eq!(
            parse_sorts(" email ,, - ,-created_at"),
            vec![
                SortKey::new("email", SortDirection::Asc),
                SortKey::new("created_at", SortDirection::Desc),
            ]
        );
        assert!(parse_sorts("").is_empty());
    }

    #[test]
    fn direction_maps_to_order() {
        assert!(matches!(Order::from(SortDirection::Asc), Order::Asc));
        assert!(matches!(Order::from(SortDirection::Desc), Order::Desc));
        assert!(SortDirection::Desc.is_desc());
        assert_eq!(SortDirection::Asc.to_string(), "asc");
    }
}
