// ABOUTME: Template type definitions
// ABOUTME: Stored template record, creation input and the explicit update patch

use chrono::{DateTime, Utc};
use proposer_core::patch::deserialize_some;
use proposer_core::ValidationErrors;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub created_by: String,
    pub is_public: bool,
    /// Placeholder names found in `content`, first appearance first
    pub placeholders: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateCreateInput {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_public: bool,
}

impl TemplateCreateInput {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_non_empty("title", &self.title);
        if self.content.is_empty() {
            errors.add("content", "must contain at least 1 character");
        }
        errors.into_result(())
    }
}

/// Mutable template fields. `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TemplatePatch {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    pub content: Option<String>,
    pub is_public: Option<bool>,
}

impl TemplatePatch {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.reject_empty_if_present("title", self.title.as_deref());
        if self.content.as_deref() == Some("") {
            errors.add("content", "must contain at least 1 character");
        }
        errors.into_result(())
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.content.is_none()
            && self.is_public.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_input_requires_title_and_content() {
        let input: TemplateCreateInput = serde_json::from_str("{}").unwrap();
        let errors = input.validate().unwrap_err();
        assert!(errors.has_field("title"));
        assert!(errors.has_field("content"));
        assert!(!input.is_public);
    }

    #[test]
    fn test_create_input_accepts_single_character_content() {
        let input = TemplateCreateInput {
            title: "Short".to_string(),
            content: "x".to_string(),
            ..Default::default()
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_patch_parses_camel_case_and_null_description() {
        let patch: TemplatePatch =
            serde_json::from_str(r#"{"isPublic": true, "description": null}"#).unwrap();
        assert_eq!(patch.is_public, Some(true));
        assert_eq!(patch.description, Some(None));
        assert!(patch.title.is_none());
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_patch_rejects_unknown_fields() {
        let parsed = serde_json::from_str::<TemplatePatch>(r#"{"createdBy": "someone"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_patch_rejects_empty_content() {
        let patch = TemplatePatch {
            content: Some(String::new()),
            title: Some("  ".to_string()),
            ..Default::default()
        };
        let errors = patch.validate().unwrap_err();
        assert!(errors.has_field("content"));
        assert!(errors.has_field("title"));
    }
}
