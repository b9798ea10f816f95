// ABOUTME: User type definitions
// ABOUTME: Structures for user accounts, registration input and profile updates

use chrono::{DateTime, Utc};
use proposer_core::{Caller, Role, ValidationErrors};
use serde::{Deserialize, Serialize};

pub const MIN_USERNAME_LEN: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Identity used for access-scoped repository calls
    pub fn caller(&self) -> Caller {
        Caller::new(self.id.clone(), self.role)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateInput {
    #[serde(default)]
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl UserCreateInput {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.username.trim().chars().count() < MIN_USERNAME_LEN {
            errors.add(
                "username",
                format!("must be at least {} characters", MIN_USERNAME_LEN),
            );
        }
        validate_email(&mut errors, self.email.as_deref());

        errors.into_result(())
    }
}

/// Mutable profile fields. Username and role are fixed at registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserProfileUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

impl UserProfileUpdate {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_email(&mut errors, self.email.as_deref());
        errors.into_result(())
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.profile_image_url.is_none()
    }
}

fn validate_email(errors: &mut ValidationErrors, email: Option<&str>) {
    if let Some(email) = email {
        let email = email.trim();
        let valid = match email.split_once('@') {
            Some((local, domain)) => !local.is_empty() && domain.contains('.'),
            None => false,
        };
        if !valid {
            errors.add("email", "must be a valid email address");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_username_rejected() {
        let input = UserCreateInput {
            username: "ab".to_string(),
            ..Default::default()
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.has_field("username"));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let input = UserCreateInput {
            username: "alice".to_string(),
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.has_field("email"));
        assert!(!errors.has_field("username"));
    }

    #[test]
    fn test_role_defaults_to_analyst_when_omitted() {
        let input: UserCreateInput = serde_json::from_str(r#"{"username": "alice"}"#).unwrap();
        assert_eq!(input.role, Role::Analyst);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_unknown_role_fails_to_parse() {
        let parsed = serde_json::from_str::<UserCreateInput>(r#"{"username": "alice", "role": "admin"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_profile_update_rejects_role_change() {
        let parsed =
            serde_json::from_str::<UserProfileUpdate>(r#"{"role": "product_manager"}"#);
        assert!(parsed.is_err());
    }
}
