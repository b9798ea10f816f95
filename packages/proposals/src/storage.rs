// ABOUTME: Access-scoped proposal storage layer using SQLite
// ABOUTME: Managers read every proposal, other roles only their own; only owners mutate

use chrono::Utc;
use proposer_core::{read_scope, Caller, ReadScope};
use proposer_storage::StorageError;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::types::{NewProposal, Proposal, ProposalPatch, ProposalStatus};

pub struct ProposalStorage {
    pool: SqlitePool,
}

impl ProposalStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_proposals(&self, caller: &Caller) -> Result<Vec<Proposal>, StorageError> {
        let scope = read_scope(caller.role, false);
        debug!(
            "Listing proposals for {} (role: {}, scope: {:?})",
            caller.user_id, caller.role, scope
        );

        let rows = match scope {
            ReadScope::All => {
                sqlx::query("SELECT * FROM proposals ORDER BY created_at DESC, rowid DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
            // Proposals carry no public flag, so both narrower scopes mean "owned"
            ReadScope::OwnedOrPublic | ReadScope::Owned => {
                sqlx::query(
                    "SELECT * FROM proposals WHERE created_by = ? ORDER BY created_at DESC, rowid DESC",
                )
                .bind(&caller.user_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter()
            .map(|row| self.row_to_proposal(row))
            .collect::<Result<Vec<_>, _>>()
    }

    /// Get a proposal by ID. Proposals outside the caller's read scope are `NotFound`.
    pub async fn get_proposal(
        &self,
        caller: &Caller,
        proposal_id: &str,
    ) -> Result<Proposal, StorageError> {
        debug!("Fetching proposal: {} for {}", proposal_id, caller.user_id);

        let proposal = self
            .fetch_proposal(proposal_id)
            .await?
            .ok_or(StorageError::NotFound)?;

        if !caller.can_read(&proposal.created_by, false) {
            return Err(StorageError::NotFound);
        }

        Ok(proposal)
    }

    /// Insert a draft proposal owned by the caller
    pub async fn create_proposal(
        &self,
        caller: &Caller,
        input: NewProposal,
    ) -> Result<Proposal, StorageError> {
        let proposal_id = format!("proposal-{}", nanoid::nanoid!());
        let now = Utc::now();
        let services = serde_json::to_string(&input.services)?;

        debug!(
            "Creating proposal: {} (title: {}, owner: {})",
            proposal_id, input.title, caller.user_id
        );

        sqlx::query(
            r#"
            INSERT INTO proposals (
                id, title, client_name, industry, services, objectives, scope,
                timeline, budget, tone, template_id, markdown_content, status,
                created_by, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&proposal_id)
        .bind(&input.title)
        .bind(&input.client_name)
        .bind(&input.industry)
        .bind(&services)
        .bind(&input.objectives)
        .bind(&input.scope)
        .bind(&input.timeline)
        .bind(&input.budget)
        .bind(&input.tone)
        .bind(&input.template_id)
        .bind(&input.markdown_content)
        .bind(ProposalStatus::Draft.as_str())
        .bind(&caller.user_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.fetch_proposal(&proposal_id)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Apply a patch. `NotFound` when the ID is unknown, `NotOwner` when the
    /// caller did not create the proposal, whatever the caller's role.
    pub async fn update_proposal(
        &self,
        caller: &Caller,
        proposal_id: &str,
        patch: ProposalPatch,
    ) -> Result<Proposal, StorageError> {
        debug!("Updating proposal: {} for {}", proposal_id, caller.user_id);

        if patch.is_empty() {
            self.check_owner(caller, proposal_id).await?;
        } else {
            // Build update query dynamically based on provided fields
            let mut query_parts = Vec::new();

            if patch.title.is_some() {
                query_parts.push("title = ?");
            }
            if patch.client_name.is_some() {
                query_parts.push("client_name = ?");
            }
            if patch.industry.is_some() {
                query_parts.push("industry = ?");
            }
            if patch.services.is_some() {
                query_parts.push("services = ?");
            }
            if patch.objectives.is_some() {
                query_parts.push("objectives = ?");
            }
            if patch.scope.is_some() {
                query_parts.push("scope = ?");
            }
            if patch.timeline.is_some() {
                query_parts.push("timeline = ?");
            }
            if patch.budget.is_some() {
                query_parts.push("budget = ?");
            }
            if patch.tone.is_some() {
                query_parts.push("tone = ?");
            }
            if patch.markdown_content.is_some() {
                query_parts.push("markdown_content = ?");
            }
            if patch.status.is_some() {
                query_parts.push("status = ?");
            }
            query_parts.push("updated_at = ?");

            let query_str = format!(
                "UPDATE proposals SET {} WHERE id = ? AND created_by = ?",
                query_parts.join(", ")
            );
            let mut query = sqlx::query(&query_str);

            // Bind parameters in the same order
            if let Some(title) = patch.title {
                query = query.bind(title);
            }
            if let Some(client_name) = patch.client_name {
                query = query.bind(client_name);
            }
            if let Some(industry) = patch.industry {
                query = query.bind(industry);
            }
            if let Some(services) = patch.services {
                query = query.bind(serde_json::to_string(&services)?);
            }
            if let Some(objectives) = patch.objectives {
                query = query.bind(objectives);
            }
            if let Some(scope) = patch.scope {
                query = query.bind(scope);
            }
            if let Some(timeline) = patch.timeline {
                query = query.bind(timeline);
            }
            if let Some(budget) = patch.budget {
                query = query.bind(budget);
            }
            if let Some(tone) = patch.tone {
                query = query.bind(tone);
            }
            if let Some(markdown_content) = patch.markdown_content {
                query = query.bind(markdown_content);
            }
            if let Some(status) = patch.status {
                query = query.bind(status.as_str());
            }
            query = query
                .bind(Utc::now())
                .bind(proposal_id)
                .bind(&caller.user_id);

            let result = query.execute(&self.pool).await?;
            if result.rows_affected() == 0 {
                self.check_owner(caller, proposal_id).await?;
                return Err(StorageError::NotFound);
            }
        }

        self.fetch_proposal(proposal_id)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Delete a proposal owned by the caller. Missing and foreign proposals
    /// both yield `NotFoundOrNotOwner`.
    pub async fn delete_proposal(
        &self,
        caller: &Caller,
        proposal_id: &str,
    ) -> Result<(), StorageError> {
        debug!("Deleting proposal: {} for {}", proposal_id, caller.user_id);

        let result = sqlx::query("DELETE FROM proposals WHERE id = ? AND created_by = ?")
            .bind(proposal_id)
            .bind(&caller.user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFoundOrNotOwner);
        }

        Ok(())
    }

    /// `NotFound` for an unknown ID, `NotOwner` for a proposal created by someone else
    async fn check_owner(&self, caller: &Caller, proposal_id: &str) -> Result<(), StorageError> {
        let owner: Option<String> =
            sqlx::query_scalar("SELECT created_by FROM proposals WHERE id = ?")
                .bind(proposal_id)
                .fetch_optional(&self.pool)
                .await?;

        match owner {
            None => Err(StorageError::NotFound),
            Some(owner) if !caller.can_mutate(&owner) => Err(StorageError::NotOwner),
            Some(_) => Ok(()),
        }
    }

    async fn fetch_proposal(&self, proposal_id: &str) -> Result<Option<Proposal>, StorageError> {
        let row = sqlx::query("SELECT * FROM proposals WHERE id = ?")
            .bind(proposal_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => Ok(Some(self.row_to_proposal(&r)?)),
            None => Ok(None),
        }
    }

    /// Convert a database row to a Proposal
    fn row_to_proposal(&self, row: &sqlx::sqlite::SqliteRow) -> Result<Proposal, StorageError> {
        let services: String = row.try_get("services")?;
        let services: Vec<String> = serde_json::from_str(&services)?;

        let status: String = row.try_get("status")?;
        let status = status
            .parse::<ProposalStatus>()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(Proposal {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            client_name: row.try_get("client_name")?,
            industry: row.try_get("industry")?,
            services,
            objectives: row.try_get("objectives")?,
            scope: row.try_get("scope")?,
            timeline: row.try_get("timeline")?,
            budget: row.try_get("budget")?,
            tone: row.try_get("tone")?,
            template_id: row.try_get("template_id")?,
            markdown_content: row.try_get("markdown_content")?,
            status,
            created_by: row.try_get("created_by")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
