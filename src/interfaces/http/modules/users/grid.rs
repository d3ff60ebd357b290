//! Grid configuration of the user directory

use sea_orm::{ColumnTrait, EntityTrait, QueryOrder};

use crate::application::grid::{DataGrid, ExportField, ExportOptions, Grid};
use crate::domain::grid::{DefaultsOverride, Filterable, Searchable, Sortable};
use crate::infrastructure::database::entities::user::{Column, Entity};
use crate::shared::GridError;

/// Interpret a flag-like filter value. `None` for anything unrecognised.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Build the users grid on top of the application defaults.
///
/// Newest accounts come first unless the request asks otherwise.
pub fn users_grid(data_grid: &DataGrid) -> Result<Grid<Entity>, GridError> {
    data_grid
        .builder::<Entity>()
        .query(Entity::find)
        .defaults(DefaultsOverride {
            sorts: Some("-created_at".to_string()),
            ..Default::default()
        })
        .searchables([
            Searchable::Column(Column::Username),
            Searchable::Column(Column::Email),
            Searchable::Column(Column::FullName),
        ])
        .filterable("role", Filterable::Column(Column::Role))
        .filterable(
            "active",
            Filterable::custom(|group, value| match parse_flag(value) {
                Some(active) => group.add(Column::IsActive.eq(active)),
                None => group,
            }),
        )
        .filterable(
            "min_age",
            Filterable::custom(|group, value| match value.trim().parse::<i32>() {
                Ok(age) => group.add(Column::Age.gte(age)),
                Err(_) => group,
            }),
        )
        .sortable("username", Sortable::Column(Column::Username))
        .sortable("email", Sortable::Column(Column::Email))
        .sortable("age", Sortable::Column(Column::Age))
        .sortable("created_at", Sortable::Column(Column::CreatedAt))
        .sortable(
            "name",
            Sortable::custom(|query, key| {
                query
                    .order_by(Column::FullName, key.direction.into())
                    .order_by(Column::Username, key.direction.into())
            }),
        )
        .export_options(ExportOptions::new([
            ExportField::labeled("ID", "id"),
            ExportField::labeled("Username", "username"),
            ExportField::labeled("Full name", "full_name"),
            ExportField::labeled("Email", "email"),
            ExportField::labeled("Role", "role"),
            ExportField::labeled("Age", "age"),
            ExportField::labeled("Active", "is_active"),
            ExportField::labeled("Created", "created_at"),
        ]))
        .build()
}
