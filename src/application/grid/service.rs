//! Application-wide grid factory

use sea_orm::EntityTrait;

use super::builder::GridBuilder;
use crate::config::AppConfig;
use crate::domain::grid::GridDefaults;

/// Hands out grid builders seeded with the application's global defaults.
#[derive(Debug, Clone, Default)]
pub struct DataGrid {
    defaults: GridDefaults,
}

impl DataGrid {
    pub fn new(defaults: GridDefaults) -> Self {
        Self { defaults }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.grid.clone())
    }

    pub fn defaults(&self) -> &GridDefaults {
        &self.defaults
    }

    pub fn builder<E: EntityTrait>(&self) -> GridBuilder<E> {
        GridBuilder::new(self.defaults.clone())
    }
}
