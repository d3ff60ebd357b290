//! Searchable, filterable and sortable descriptors
//!
//! Each capability is either a plain entity column, handled by the grid, or
//! a custom closure that decides the clause itself.

use std::fmt;
use std::sync::Arc;

use sea_orm::{Condition, EntityTrait, IdenStatic, Select};

use super::sort::SortKey;

/// Adds search or filter conditions to a condition group.
pub type ConditionFn = Arc<dyn Fn(Condition, &str) -> Condition + Send + Sync>;

/// Applies ordering for a sort key.
pub type SortFn<E> = Arc<dyn Fn(Select<E>, &SortKey) -> Select<E> + Send + Sync>;

/// A field eligible for free-text search.
///
/// `Custom` receives the OR group and the sanitized search text.
pub enum Searchable<E: EntityTrait> {
    Column(E::Column),
    Custom(ConditionFn),
}

impl<E: EntityTrait> Searchable<E> {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(Condition, &str) -> Condition + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }
}

/// A field eligible for equality filtering.
///
/// `Column` compares the column with the submitted value as a string, so it
/// suits text and string-backed enum columns. Numeric, boolean and date
/// columns need `Custom` to parse the value first; only SQLite coerces the
/// types on its own. `Custom` receives the AND group and the submitted value.
pub enum Filterable<E: EntityTrait> {
    Column(E::Column),
    Custom(ConditionFn),
}

impl<E: EntityTrait> Filterable<E> {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(Condition, &str) -> Condition + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }
}

/// A field eligible for ordering.
///
/// `Custom` receives the query and the requested key and returns the
/// ordered query.
pub enum Sortable<E: EntityTrait> {
    Column(E::Column),
    Custom(SortFn<E>),
}

impl<E: EntityTrait> Sortable<E> {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(Select<E>, &SortKey) -> Select<E> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }
}

macro_rules! impl_descriptor_traits {
    ($name:ident) => {
        impl<E: EntityTrait> Clone for $name<E> {
            fn clone(&self) -> Self {
                match self {
                    Self::Column(col) => Self::Column(*col),
                    Self::Custom(f) => Self::Custom(Arc::clone(f)),
                }
            }
        }

        impl<E: EntityTrait> fmt::Debug for $name<E> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    Self::Column(col) => write!(f, "{}::Column({})", stringify!($name), col.as_str()),
                    Self::Custom(_) => write!(f, "{}::Custom(..)", stringify!($name)),
                }
            }
        }
    };
}

impl_descriptor_traits!(Searchable);
impl_descriptor_traits!(Filterable);
impl_descriptor_traits!(Sortable);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::entities::user;

    #[test]
    fn debug_names_the_column() {
        let s: Searchable<user::Entity> = Searchable::Column(user::Column::Email);
        assert_eq!(format!("{s:?}"), "Searchable::Column(email)");

        let f: Filterable<user::Entity> = Filterable::custom(|group, _| group);
        assert_eq!(format!("{f:?}"), "Filterable::Custom(..)");
    }

    #[test]
    fn clones_share_the_closure() {
        let s: Sortable<user::Entity> = Sortable::custom(|query, _| query);
        let cloned = s.clone();
        match (&s, &cloned) {
            (Sortable::Custom(a), Sortable::Custom(b)) => assert!(Arc::ptr_eq(a, b)),
            _ => panic!("expected custom sortables"),
        }
    }
}
