use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::advice::sanitize::{sanitize, SanitizeMode};

/// The free-text profile a user submits to get advice.
///
/// The five core fields are required; the extended fields are optional and
/// render as "Not specified" in prompts when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub interests: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub skills: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub education: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub goals: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_roles: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_preference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_preference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A JSON `null` in a required field counts as an empty answer, so it fails
/// validation by name instead of failing deserialization.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill all required fields before generating advice (missing: {})", .missing.join(", "))]
pub struct ProfileValidationError {
    pub missing: Vec<&'static str>,
}

impl UserProfile {
    /// Required fields, in form order.
    pub fn required_fields(&self) -> [(&'static str, &str); 5] {
        [
            ("name", self.name.as_str()),
            ("interests", self.interests.as_str()),
            ("skills", self.skills.as_str()),
            ("education", self.education.as_str()),
            ("goals", self.goals.as_str()),
        ]
    }

    /// Accepts the profile iff every required field is non-empty after trimming.
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        let missing: Vec<&'static str> = self
            .required_fields()
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ProfileValidationError { missing })
        }
    }

    /// Returns a copy with every field sanitized. Optional fields that end up
    /// empty are dropped so they render as placeholders.
    pub fn sanitized(&self, mode: SanitizeMode) -> Self {
        let optional = |value: &Option<String>| {
            Some(sanitize(value.as_deref(), mode)).filter(|v| !v.is_empty())
        };

        Self {
            name: sanitize(self.name.as_str(), mode),
            interests: sanitize(self.interests.as_str(), mode),
            skills: sanitize(self.skills.as_str(), mode),
            education: sanitize(self.education.as_str(), mode),
            goals: sanitize(self.goals.as_str(), mode),
            preferred_roles: optional(&self.preferred_roles),
            target_domain: optional(&self.target_domain),
            location_preference: optional(&self.location_preference),
            work_style: optional(&self.work_style),
            risk_preference: optional(&self.risk_preference),
            priority: optional(&self.priority),
            notes: optional(&self.notes),
        }
    }
}
