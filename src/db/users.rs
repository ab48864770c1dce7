use sqlx::PgPool;

use crate::error::{AppError, Result};
use crate::models::User;

/// Look up a user by email; absent users are an error
pub async fn get_user(pool: &PgPool, email: &str) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
    .map_err(AppError::database("Failed to fetch user."))?
    .ok_or(AppError::UserNotFound)
}
