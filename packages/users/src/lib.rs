// ABOUTME: User accounts for Proposer
// ABOUTME: Provides user types, registration validation and the SQLite storage layer

pub mod storage;
pub mod types;

// Re-export main types
pub use storage::UserStorage;
pub use types::{User, UserCreateInput, UserProfileUpdate};
