use chrono::NaiveDateTime;
use sqlx::FromRow;

pub type UserId = i64;

/// A row of the `Users` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbUser {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Values needed to insert a user. The hash is computed before this is built.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
