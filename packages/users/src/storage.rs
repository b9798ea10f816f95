// ABOUTME: User storage layer using SQLite
// ABOUTME: Handles registration, lookup and profile updates for users

use chrono::Utc;
use proposer_core::Role;
use proposer_storage::{map_unique_violation, StorageError};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::types::{User, UserCreateInput, UserProfileUpdate};

pub struct UserStorage {
    pool: SqlitePool,
}

impl UserStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a new user. Fails with `Duplicate` when the username is taken.
    pub async fn create_user(&self, input: UserCreateInput) -> Result<User, StorageError> {
        let user_id = format!("user-{}", nanoid::nanoid!());
        let now = Utc::now();

        debug!("Creating user: {} (username: {})", user_id, input.username);

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, first_name, last_name, role, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user_id)
        .bind(input.username.trim())
        .bind(input.email.as_deref().map(str::trim))
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(input.role.as_str())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "username or email already registered"))?;

        self.get_user(&user_id).await
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User, StorageError> {
        debug!("Fetching user: {}", user_id);

        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        self.row_to_user(&row)
    }

    /// Update profile fields of a user
    pub async fn update_profile(
        &self,
        user_id: &str,
        input: UserProfileUpdate,
    ) -> Result<User, StorageError> {
        debug!("Updating profile for user: {}", user_id);

        if input.is_empty() {
            return self.get_user(user_id).await;
        }

        // Build update query dynamically based on provided fields
        let mut query_parts = Vec::new();

        if input.email.is_some() {
            query_parts.push("email = ?");
        }
        if input.first_name.is_some() {
            query_parts.push("first_name = ?");
        }
        if input.last_name.is_some() {
            query_parts.push("last_name = ?");
        }
        if input.profile_image_url.is_some() {
            query_parts.push("profile_image_url = ?");
        }
        query_parts.push("updated_at = ?");

        let query_str = format!("UPDATE users SET {} WHERE id = ?", query_parts.join(", "));
        let mut query = sqlx::query(&query_str);

        // Bind parameters in the same order
        if let Some(email) = input.email {
            query = query.bind(email.trim().to_string());
        }
        if let Some(first_name) = input.first_name {
            query = query.bind(first_name);
        }
        if let Some(last_name) = input.last_name {
            query = query.bind(last_name);
        }
        if let Some(url) = input.profile_image_url {
            query = query.bind(url);
        }
        query = query.bind(Utc::now()).bind(user_id);

        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "email already registered"))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.get_user(user_id).await
    }

    /// Convert a database row to a User
    fn row_to_user(&self, row: &sqlx::sqlite::SqliteRow) -> Result<User, StorageError> {
        let role: String = row.try_get("role")?;
        let role = role
            .parse::<Role>()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(User {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            profile_image_url: row.try_get("profile_image_url")?,
            role,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
