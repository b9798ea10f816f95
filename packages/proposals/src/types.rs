// ABOUTME: Proposal type definitions
// ABOUTME: Stored proposal record, lifecycle status, insert input and the explicit update patch

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use proposer_core::patch::deserialize_some;
use proposer_core::ValidationErrors;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    #[default]
    Draft,
    Completed,
    Sent,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Draft => "draft",
            ProposalStatus::Completed => "completed",
            ProposalStatus::Sent => "sent",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown proposal status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for ProposalStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ProposalStatus::Draft),
            "completed" => Ok(ProposalStatus::Completed),
            "sent" => Ok(ProposalStatus::Sent),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: String,
    pub title: String,
    pub client_name: String,
    pub industry: String,
    /// Selected services in the order the client picked them
    pub services: Vec<String>,
    pub objectives: String,
    pub scope: Option<String>,
    pub timeline: String,
    pub budget: String,
    pub tone: String,
    pub template_id: Option<String>,
    pub markdown_content: String,
    pub status: ProposalStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything needed to insert a proposal apart from its owner.
/// Built by the generator once the Markdown body exists.
#[derive(Debug, Clone)]
pub struct NewProposal {
    pub title: String,
    pub client_name: String,
    pub industry: String,
    pub services: Vec<String>,
    pub objectives: String,
    pub scope: Option<String>,
    pub timeline: String,
    pub budget: String,
    pub tone: String,
    pub template_id: Option<String>,
    pub markdown_content: String,
}

/// Mutable proposal fields. `scope: Some(None)` clears the scope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProposalPatch {
    pub title: Option<String>,
    pub client_name: Option<String>,
    pub industry: Option<String>,
    pub services: Option<Vec<String>>,
    pub objectives: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub scope: Option<Option<String>>,
    pub timeline: Option<String>,
    pub budget: Option<String>,
    pub tone: Option<String>,
    pub markdown_content: Option<String>,
    pub status: Option<ProposalStatus>,
}

impl ProposalPatch {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.reject_empty_if_present("title", self.title.as_deref());
        errors.reject_empty_if_present("clientName", self.client_name.as_deref());
        errors.reject_empty_if_present("industry", self.industry.as_deref());
        errors.reject_empty_if_present("objectives", self.objectives.as_deref());
        errors.reject_empty_if_present("timeline", self.timeline.as_deref());
        errors.reject_empty_if_present("budget", self.budget.as_deref());
        errors.reject_empty_if_present("tone", self.tone.as_deref());
        errors.reject_empty_if_present("markdownContent", self.markdown_content.as_deref());

        if let Some(services) = &self.services {
            if services.is_empty() {
                errors.add("services", "must contain at least one service");
            } else if services.iter().any(|s| s.trim().is_empty()) {
                errors.add("services", "must not contain empty entries");
            }
        }

        errors.into_result(())
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.client_name.is_none()
            && self.industry.is_none()
            && self.services.is_none()
            && self.objectives.is_none()
            && self.scope.is_none()
            && self.timeline.is_none()
            && self.budget.is_none()
            && self.tone.is_none()
            && self.markdown_content.is_none()
            && self.status.is_none()
    }
}
