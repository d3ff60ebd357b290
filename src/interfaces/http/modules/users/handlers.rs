//! User directory API handlers
//!
//! Both endpoints share one grid, so a listing and its export always agree
//! on search, filters and order.

use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sea_orm::DatabaseConnection;

use super::dto::UserDto;
use crate::application::grid::Grid;
use crate::infrastructure::database::entities::user;
use crate::interfaces::http::common::{GridQuery, GridQueryParams, PaginatedResponse};
use crate::shared::AppError;

/// Users handler state
#[derive(Clone)]
pub struct UsersState {
    pub db: DatabaseConnection,
    pub grid: Arc<Grid<user::Entity>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    params(GridQueryParams),
    responses(
        (status = 200, description = "One page of users", body = PaginatedResponse<UserDto>),
        (status = 500, description = "Query failed")
    )
)]
pub async fn list_users(
    State(state): State<UsersState>,
    GridQuery(params): GridQuery,
) -> Result<Json<PaginatedResponse<UserDto>>, AppError> {
    let page = state.grid.paginate(&state.db, &params).await?;
    Ok(Json(page.map(UserDto::from).into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/export",
    tag = "Users",
    params(GridQueryParams),
    responses(
        (status = 200, description = "All matching users as CSV", content_type = "text/csv", body = String),
        (status = 500, description = "Query failed")
    )
)]
pub async fn export_users(
    State(state): State<UsersState>,
    GridQuery(params): GridQuery,
) -> Result<impl IntoResponse, AppError> {
    let csv = state.grid.export(&state.db, &params).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"users.csv\""),
        ],
        csv,
    ))
}

/// Routes of the users module
pub fn router(state: UsersState) -> Router {
    Router::new()
        .route("/api/v1/users", get(list_users))
        .route("/api/v1/users/export", get(export_users))
        .with_state(state)
}
