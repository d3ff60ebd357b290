use thiserror::Error;

/// Grid setup errors.
///
/// Raised synchronously while an endpoint's grid is being configured,
/// never at request time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Grid query function is not set")]
    MissingQueryFn,

    #[error("Invalid grid defaults: {0}")]
    InvalidDefaults(String),

    #[error("Empty {0} name")]
    EmptyName(&'static str),

    #[error("Grid has no export options")]
    MissingExportOptions,

    #[error("Export options contain no fields")]
    EmptyExportFields,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Export error: {0}")]
    Export(#[from] csv::Error),

    #[error("Export encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

pub type AppResult<T> = Result<T, AppError>;
