// ABOUTME: Generate-then-persist workflow for proposals
// ABOUTME: Resolves an optional template, calls the text generator once, stores the result as a draft

use std::sync::Arc;

use proposer_ai::TextGenerator;
use proposer_core::Caller;
use proposer_proposals::{NewProposal, Proposal, ProposalStorage};
use proposer_storage::StorageError;
use proposer_templates::{substitute_placeholders, PlaceholderValues, TemplateStorage};
use tracing::{error, info, warn};

use crate::error::GenerationError;
use crate::prompts::{proposal_system_prompt, proposal_user_prompt};
use crate::request::GenerateProposalRequest;

/// A template that was found and filled in for this request
struct ResolvedTemplate {
    id: String,
    content: String,
}

pub struct ProposalGenerator {
    templates: Arc<TemplateStorage>,
    proposals: Arc<ProposalStorage>,
    ai: Arc<dyn TextGenerator>,
}

impl ProposalGenerator {
    pub fn new(
        templates: Arc<TemplateStorage>,
        proposals: Arc<ProposalStorage>,
        ai: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            templates,
            proposals,
            ai,
        }
    }

    /// Validate, generate and store a new proposal owned by `caller`.
    ///
    /// Invalid requests fail before any template lookup or model call.
    /// Every call creates a new record.
    pub async fn generate(
        &self,
        caller: &Caller,
        request: GenerateProposalRequest,
    ) -> Result<Proposal, GenerationError> {
        request.validate()?;

        info!(
            "Generating proposal for {} (client: {}, template: {:?})",
            caller.user_id,
            request.client_name,
            request.template_id()
        );

        let template = self.resolve_template(caller, &request).await?;

        let system_prompt = proposal_system_prompt(
            template.as_ref().map(|t| t.content.as_str()),
            request.tone(),
        );
        let user_prompt = proposal_user_prompt(&request);

        let markdown_content = self
            .ai
            .generate_text(&system_prompt, &user_prompt)
            .await
            .map_err(|e| {
                error!("Proposal generation failed for {}: {}", caller.user_id, e);
                GenerationError::Generation(e)
            })?;

        let new_proposal = NewProposal {
            title: request.title(),
            scope: request.scope().map(str::to_string),
            tone: request.tone().to_string(),
            template_id: template.map(|t| t.id),
            client_name: request.client_name,
            industry: request.industry,
            services: request.services,
            objectives: request.objectives,
            timeline: request.timeline,
            budget: request.budget,
            markdown_content,
        };

        let proposal = self
            .proposals
            .create_proposal(caller, new_proposal)
            .await
            .map_err(|e| {
                error!("Failed to store generated proposal: {}", e);
                GenerationError::Storage(e)
            })?;

        info!("Generated proposal {} for {}", proposal.id, caller.user_id);
        Ok(proposal)
    }

    /// Load and fill the requested template. A template that is missing or
    /// outside the caller's read scope falls back to no template.
    async fn resolve_template(
        &self,
        caller: &Caller,
        request: &GenerateProposalRequest,
    ) -> Result<Option<ResolvedTemplate>, GenerationError> {
        let Some(template_id) = request.template_id() else {
            return Ok(None);
        };

        match self.templates.get_template(caller, template_id).await {
            Ok(template) => Ok(Some(ResolvedTemplate {
                content: substitute_placeholders(&template.content, &placeholder_values(request)),
                id: template.id,
            })),
            Err(StorageError::NotFound) => {
                warn!(
                    "Template {} not available to {}, generating without a template",
                    template_id, caller.user_id
                );
                Ok(None)
            }
            Err(e) => Err(GenerationError::Storage(e)),
        }
    }
}

fn placeholder_values(request: &GenerateProposalRequest) -> PlaceholderValues {
    PlaceholderValues::from([
        ("clientName".to_string(), request.client_name.clone()),
        ("industry".to_string(), request.industry.clone()),
        ("services".to_string(), request.services_joined()),
        ("objectives".to_string(), request.objectives.clone()),
        ("timeline".to_string(), request.timeline.clone()),
        ("budget".to_string(), request.budget.clone()),
    ])
}
