// ABOUTME: Environment variable names and default filesystem locations
// ABOUTME: Centralized definitions consumed by configuration loading in the CLI

use std::env;
use std::path::PathBuf;

// Server Configuration
pub const PROPOSER_HOST: &str = "PROPOSER_HOST";
pub const PROPOSER_API_PORT: &str = "PROPOSER_API_PORT";
pub const PORT: &str = "PORT"; // Legacy
pub const PROPOSER_CORS_ORIGIN: &str = "PROPOSER_CORS_ORIGIN";

// Storage Configuration
pub const PROPOSER_DATABASE_PATH: &str = "PROPOSER_DATABASE_PATH";

// Text Generation Configuration
pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const ANTHROPIC_MODEL: &str = "ANTHROPIC_MODEL";
pub const ANTHROPIC_API_URL: &str = "ANTHROPIC_API_URL";
pub const PROPOSER_AI_TIMEOUT_SECS: &str = "PROPOSER_AI_TIMEOUT_SECS";

// System Environment Variables
pub const HOME: &str = "HOME";

/// Get the path to the Proposer directory (~/.proposer)
pub fn proposer_dir() -> PathBuf {
    // HOME first so tests can redirect it
    if let Ok(home) = env::var(HOME) {
        PathBuf::from(home).join(".proposer")
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".proposer")
    }
}

/// Default database location (~/.proposer/proposer.db)
pub fn database_file() -> PathBuf {
    proposer_dir().join("proposer.db")
}
