// ABOUTME: Core types and utilities for Proposer
// ABOUTME: Foundational package providing roles, access policy and validation shared by all packages

pub mod constants;
pub mod patch;
pub mod policy;
pub mod validation;

// Re-export constants
pub use constants::{database_file, proposer_dir};

// Re-export policy types
pub use policy::{can_mutate, can_read, read_scope, Caller, ReadScope, Role, UnknownRole};

// Re-export validation
pub use validation::{FieldError, ValidationErrors};
