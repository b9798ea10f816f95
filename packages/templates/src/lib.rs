// ABOUTME: Proposal templates for Proposer
// ABOUTME: Placeholder substitution, template types and the access-scoped template repository

pub mod placeholders;
pub mod storage;
pub mod types;

// Re-export main types
pub use placeholders::{find_placeholders, substitute_placeholders, PlaceholderValues};
pub use storage::TemplateStorage;
pub use types::{Template, TemplateCreateInput, TemplatePatch};
