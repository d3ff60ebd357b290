//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::infrastructure::database::entities::user;

/// A row of the user listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub email: String,
    /// `admin`, `operator` or `viewer`
    pub role: String,
    pub age: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<user::Model> for UserDto {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            full_name: m.full_name,
            email: m.email,
            role: m.role.to_string(),
            age: m.age,
            is_active: m.is_active,
            created_at: m.created_at,
        }
    }
}
