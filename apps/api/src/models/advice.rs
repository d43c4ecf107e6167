use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::advice::builder::PromptMode;
use crate::advice::generator::{AdviceText, GenerationError};
use crate::models::profile::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdviceStatus {
    Generated,
    Failed,
}

/// One recorded invocation. Immutable once created.
///
/// `text` is always displayable: the provider's markdown, or the error stand-in.
/// Consumers that need to tell the two apart read `status`, not the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceResult {
    pub id: Uuid,
    pub title: String,
    pub mode: PromptMode,
    pub profile: UserProfile,
    pub text: String,
    pub status: AdviceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<GenerationError>,
    pub timestamp: DateTime<Utc>,
}

impl AdviceResult {
    /// `position` is this entry's 1-based index in its session history.
    pub fn new(
        profile: UserProfile,
        mode: PromptMode,
        outcome: Result<AdviceText, GenerationError>,
        position: usize,
    ) -> Self {
        let (text, status, error) = match outcome {
            Ok(advice) => (advice.into_inner(), AdviceStatus::Generated, None),
            Err(e) => (e.display_text(), AdviceStatus::Failed, Some(e)),
        };

        Self {
            id: Uuid::new_v4(),
            title: format!("{}'s Plan #{position}", profile.name),
            mode,
            profile,
            text,
            status,
            error,
            timestamp: Utc::now(),
        }
    }
}
