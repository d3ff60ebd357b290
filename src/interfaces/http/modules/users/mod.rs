//! Users module: grid-backed listing and CSV export of the user directory

pub mod dto;
pub mod grid;
pub mod handlers;

pub use dto::*;
pub use grid::users_grid;
pub use handlers::*;
