// ABOUTME: Generation request payload and its validation
// ABOUTME: Missing optional fields take their defaults here so the workflow sees a complete request

use proposer_core::ValidationErrors;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TONE: &str = "professional";

fn default_tone() -> String {
    DEFAULT_TONE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateProposalRequest {
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub objectives: String,
    pub scope: Option<String>,
    #[serde(default)]
    pub timeline: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default = "default_tone")]
    pub tone: String,
    pub template_id: Option<String>,
}

impl Default for GenerateProposalRequest {
    fn default() -> Self {
        Self {
            client_name: String::new(),
            industry: String::new(),
            services: Vec::new(),
            objectives: String::new(),
            scope: None,
            timeline: String::new(),
            budget: String::new(),
            tone: default_tone(),
            template_id: None,
        }
    }
}

impl GenerateProposalRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_non_empty("clientName", &self.client_name);
        errors.require_non_empty("industry", &self.industry);

        if self.services.is_empty() {
            errors.add("services", "must contain at least one service");
        } else if self.services.iter().any(|s| s.trim().is_empty()) {
            errors.add("services", "must not contain empty entries");
        }

        errors.require_non_empty("objectives", &self.objectives);
        errors.require_non_empty("timeline", &self.timeline);
        errors.require_non_empty("budget", &self.budget);
        errors.into_result(())
    }

    /// `"{clientName} - {industry} Proposal"`
    pub fn title(&self) -> String {
        format!("{} - {} Proposal", self.client_name, self.industry)
    }

    /// Services as one comma-separated phrase
    pub fn services_joined(&self) -> String {
        self.services.join(", ")
    }

    /// Scope, treating a blank value as absent
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Tone, falling back to the default when blank
    pub fn tone(&self) -> &str {
        if self.tone.trim().is_empty() {
            DEFAULT_TONE
        } else {
            &self.tone
        }
    }

    pub fn template_id(&self) -> Option<&str> {
        self.template_id.as_deref().filter(|id| !id.trim().is_empty())
    }
}
