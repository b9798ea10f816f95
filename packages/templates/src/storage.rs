// ABOUTME: Access-scoped template storage layer using SQLite
// ABOUTME: Applies role-based read scope and owner-only mutation to every template query

use chrono::Utc;
use proposer_core::{read_scope, Caller, ReadScope};
use proposer_storage::StorageError;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::placeholders::find_placeholders;
use super::types::{Template, TemplateCreateInput, TemplatePatch};

pub struct TemplateStorage {
    pool: SqlitePool,
}

impl TemplateStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Templates visible to the caller, newest first
    pub async fn list_templates(&self, caller: &Caller) -> Result<Vec<Template>, StorageError> {
        let scope = read_scope(caller.role, true);
        debug!(
            "Listing templates for {} (role: {}, scope: {:?})",
            caller.user_id, caller.role, scope
        );

        let rows = match scope {
            ReadScope::All => {
                sqlx::query("SELECT * FROM templates ORDER BY created_at DESC, rowid DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
            ReadScope::OwnedOrPublic => {
                sqlx::query(
                    "SELECT * FROM templates WHERE created_by = ? OR is_public = 1 ORDER BY created_at DESC, rowid DESC",
                )
                .bind(&caller.user_id)
                .fetch_all(&self.pool)
                .await?
            }
            ReadScope::Owned => {
                sqlx::query(
                    "SELECT * FROM templates WHERE created_by = ? ORDER BY created_at DESC, rowid DESC",
                )
                .bind(&caller.user_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter()
            .map(|row| self.row_to_template(row))
            .collect::<Result<Vec<_>, _>>()
    }

    /// Get a template by ID.
    ///
    /// A template the caller may not read is reported as `NotFound` so its
    /// existence does not leak.
    pub async fn get_template(
        &self,
        caller: &Caller,
        template_id: &str,
    ) -> Result<Template, StorageError> {
        debug!("Fetching template: {} for {}", template_id, caller.user_id);

        let template = self
            .fetch_template(template_id)
            .await?
            .ok_or(StorageError::NotFound)?;

        if !caller.can_read(&template.created_by, template.is_public) {
            debug!(
                "Template {} is not visible to {}",
                template_id, caller.user_id
            );
            return Err(StorageError::NotFound);
        }

        Ok(template)
    }

    /// Create a template owned by the caller
    pub async fn create_template(
        &self,
        caller: &Caller,
        input: TemplateCreateInput,
    ) -> Result<Template, StorageError> {
        let template_id = format!("template-{}", nanoid::nanoid!());
        let now = Utc::now();

        debug!(
            "Creating template: {} (title: {}, owner: {})",
            template_id, input.title, caller.user_id
        );

        sqlx::query(
            r#"
            INSERT INTO templates (id, title, description, content, created_by, is_public, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&template_id)
        .bind(input.title.trim())
        .bind(&input.description)
        .bind(&input.content)
        .bind(&caller.user_id)
        .bind(input.is_public)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.fetch_template(&template_id)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Apply a patch. `NotFound` when the ID is unknown, `NotOwner` when the
    /// caller did not create the template.
    pub async fn update_template(
        &self,
        caller: &Caller,
        template_id: &str,
        patch: TemplatePatch,
    ) -> Result<Template, StorageError> {
        debug!("Updating template: {} for {}", template_id, caller.user_id);

        if patch.is_empty() {
            self.check_owner(caller, template_id).await?;
        } else {
            // Build update query dynamically based on provided fields
            let mut query_parts = Vec::new();

            if patch.title.is_some() {
                query_parts.push("title = ?");
            }
            if patch.description.is_some() {
                query_parts.push("description = ?");
            }
            if patch.content.is_some() {
                query_parts.push("content = ?");
            }
            if patch.is_public.is_some() {
                query_parts.push("is_public = ?");
            }
            query_parts.push("updated_at = ?");

            let query_str = format!(
                "UPDATE templates SET {} WHERE id = ? AND created_by = ?",
                query_parts.join(", ")
            );
            let mut query = sqlx::query(&query_str);

            // Bind parameters in the same order
            if let Some(title) = patch.title {
                query = query.bind(title.trim().to_string());
            }
            if let Some(description) = patch.description {
                query = query.bind(description);
            }
            if let Some(content) = patch.content {
                query = query.bind(content);
            }
            if let Some(is_public) = patch.is_public {
                query = query.bind(is_public);
            }
            query = query
                .bind(Utc::now())
                .bind(template_id)
                .bind(&caller.user_id);

            let result = query.execute(&self.pool).await?;
            if result.rows_affected() == 0 {
                self.check_owner(caller, template_id).await?;
                return Err(StorageError::NotFound);
            }
        }

        self.fetch_template(template_id)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Delete a template owned by the caller.
    ///
    /// Missing and foreign templates both yield `NotFoundOrNotOwner`.
    pub async fn delete_template(
        &self,
        caller: &Caller,
        template_id: &str,
    ) -> Result<(), StorageError> {
        debug!("Deleting template: {} for {}", template_id, caller.user_id);

        let result = sqlx::query("DELETE FROM templates WHERE id = ? AND created_by = ?")
            .bind(template_id)
            .bind(&caller.user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFoundOrNotOwner);
        }

        Ok(())
    }

    /// `NotFound` for an unknown ID, `NotOwner` for a template created by someone else
    async fn check_owner(&self, caller: &Caller, template_id: &str) -> Result<(), StorageError> {
        let owner: Option<String> =
            sqlx::query_scalar("SELECT created_by FROM templates WHERE id = ?")
                .bind(template_id)
                .fetch_optional(&self.pool)
                .await?;

        match owner {
            None => Err(StorageError::NotFound),
            Some(owner) if !caller.can_mutate(&owner) => Err(StorageError::NotOwner),
            Some(_) => Ok(()),
        }
    }

    async fn fetch_template(&self, template_id: &str) -> Result<Option<Template>, StorageError> {
        let row = sqlx::query("SELECT * FROM templates WHERE id = ?")
            .bind(template_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => Ok(Some(self.row_to_template(&r)?)),
            None => Ok(None),
        }
    }

    /// Convert a database row to a Template
    fn row_to_template(&self, row: &sqlx::sqlite::SqliteRow) -> Result<Template, StorageError> {
        let content: String = row.try_get("content")?;
        let placeholders = find_placeholders(&content)
            .into_iter()
            .map(str::to_string)
            .collect();

        Ok(Template {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            created_by: row.try_get("created_by")?,
            is_public: row.try_get("is_public")?,
            placeholders,
            content,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
