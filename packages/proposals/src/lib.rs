// ABOUTME: Proposal management for Proposer
// ABOUTME: Proposal records, access-scoped storage and Markdown/HTML export

pub mod export;
pub mod storage;
pub mod types;

pub use export::{export_proposal, ExportFormat, ExportedDocument, UnknownExportFormat};
pub use storage::ProposalStorage;
pub use types::{NewProposal, Proposal, ProposalPatch, ProposalStatus, UnknownStatus};
