// ABOUTME: Role enumeration and the read/mutate policy for owned records
// ABOUTME: Single source of truth used by every access-scoped repository

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User role. Determines read scope only, never ownership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Analyst,
    Consultant,
    ProductManager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Analyst => "analyst",
            Role::Consultant => "consultant",
            Role::ProductManager => "product_manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "analyst" => Ok(Role::Analyst),
            "consultant" => Ok(Role::Consultant),
            "product_manager" => Ok(Role::ProductManager),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// The authenticated identity on whose behalf a repository call runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: String,
    pub role: Role,
}

impl Caller {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    pub fn owns(&self, owner_id: &str) -> bool {
        self.user_id == owner_id
    }

    pub fn can_read(&self, owner_id: &str, is_public: bool) -> bool {
        can_read(self.role, self.owns(owner_id), is_public)
    }

    pub fn can_mutate(&self, owner_id: &str) -> bool {
        can_mutate(self.role, self.owns(owner_id))
    }
}

/// Whether a record is visible to a caller.
///
/// Managers read everything; everyone else reads what they own plus
/// records flagged public. Kinds without a public flag pass `false`.
pub fn can_read(role: Role, owner_match: bool, is_public: bool) -> bool {
    role == Role::ProductManager || owner_match || is_public
}

/// Whether a caller may update or delete a record.
///
/// Ownership is the only criterion. The manager read privilege does not
/// extend to writes.
pub fn can_mutate(_role: Role, owner_match: bool) -> bool {
    owner_match
}

/// Listing filter derived from [`can_read`], used to build SQL predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadScope {
    All,
    OwnedOrPublic,
    Owned,
}

/// Resolve the listing scope for a role and a record kind
pub fn read_scope(role: Role, kind_has_public_flag: bool) -> ReadScope {
    if can_read(role, false, false) {
        ReadScope::All
    } else if kind_has_public_flag {
        ReadScope::OwnedOrPublic
    } else {
        ReadScope::Owned
    }
}
