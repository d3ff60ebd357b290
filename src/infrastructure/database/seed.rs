//! Demo data for the users grid

use chrono::{Duration, TimeZone, Utc};
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, Set};
use tracing::info;

use super::entities::user::{self, UserRole};

const DEMO_USERS: &[(&str, &str, UserRole, i32, bool)] = &[
    ("alice", "Alice Johnson", UserRole::Admin, 34, true),
    ("bob", "Bob Smith", UserRole::Operator, 28, true),
    ("carol", "Carol White", UserRole::Viewer, 45, true),
    ("dave", "Dave Brown", UserRole::Viewer, 19, false),
    ("erin", "Erin Davis", UserRole::Operator, 52, true),
    ("frank", "Frank Miller", UserRole::Viewer, 37, true),
    ("grace", "Grace Wilson", UserRole::Admin, 41, true),
    ("heidi", "Heidi Moore", UserRole::Viewer, 23, false),
    ("ivan", "Ivan Taylor", UserRole::Operator, 30, true),
    ("judy", "Judy Anderson", UserRole::Viewer, 26, true),
    ("mallory", "Mallory Thomas", UserRole::Viewer, 48, false),
    ("oscar", "Oscar Jackson", UserRole::Operator, 33, true),
];

/// Insert the demo users into an empty `users` table.
///
/// Returns the number of rows inserted; a table that already has rows is
/// left untouched.
pub async fn seed_demo_users<C: ConnectionTrait>(db: &C) -> Result<u64, DbErr> {
    let existing = user::Entity::find().count(db).await?;
    if existing > 0 {
        info!("Users table already has {} rows, skipping seed", existing);
        return Ok(0);
    }

    let epoch = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).single().unwrap_or_else(Utc::now);
    let models = DEMO_USERS
        .iter()
        .enumerate()
        .map(|(i, (username, full_name, role, age, is_active))| user::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            username: Set(username.to_string()),
            full_name: Set(full_name.to_string()),
            email: Set(format!("{}@example.com", username)),
            role: Set(role.clone()),
            age: Set(*age),
            is_active: Set(*is_active),
            created_at: Set(epoch + Duration::days(i as i64)),
        });

    let inserted = user::Entity::insert_many(models)
        .exec_without_returning(db)
        .await?;
    info!("Seeded {} demo users", inserted);
    Ok(inserted)
}
