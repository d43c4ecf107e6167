//! Prompt construction — renders a `UserProfile` into the instruction sent to the model.
//!
//! Pure and deterministic: the same profile and mode always give the same bytes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::advice::prompts::{
    CAREER_TASK, CHART_TASK, FORMAT_INSTRUCTION, INTERVIEW_TASK, PREFERENCES_TEMPLATE,
    PROFILE_TEMPLATE, SKILLS_TASK,
};
use crate::advice::sanitize::{sanitize, SanitizeMode};
use crate::models::profile::UserProfile;

pub const NOT_PROVIDED: &str = "Not provided";
pub const NOT_SPECIFIED: &str = "Not specified";

/// Which instruction set follows the profile block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptMode {
    /// Career paths, roadmap, salary, resources, resume and interview tips.
    #[default]
    Career,
    Skills,
    Interview,
    /// Quick tabular overview.
    Chart,
}

impl PromptMode {
    fn task(&self) -> &'static str {
        match self {
            PromptMode::Career => CAREER_TASK,
            PromptMode::Skills => SKILLS_TASK,
            PromptMode::Interview => INTERVIEW_TASK,
            PromptMode::Chart => CHART_TASK,
        }
    }
}

impl fmt::Display for PromptMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PromptMode::Career => "career",
            PromptMode::Skills => "skills",
            PromptMode::Interview => "interview",
            PromptMode::Chart => "chart",
        };
        f.write_str(label)
    }
}

/// Renders the full prompt for `profile` in `mode`.
///
/// Fields are trimmed; blank ones become a placeholder so no sentence is left dangling.
/// The preferences block is included only when at least one extended field is set.
pub fn build_prompt(profile: &UserProfile, mode: PromptMode) -> String {
    let field = |value: &str, placeholder: &'static str| {
        let clean = sanitize(value, SanitizeMode::Trim);
        if clean.is_empty() {
            placeholder.to_string()
        } else {
            clean
        }
    };
    let optional = |value: &Option<String>| field(value.as_deref().unwrap_or(""), NOT_SPECIFIED);

    let profile_block = render(
        PROFILE_TEMPLATE,
        &[
            ("name", field(profile.name.as_str(), NOT_PROVIDED)),
            ("interests", field(profile.interests.as_str(), NOT_SPECIFIED)),
            ("skills", field(profile.skills.as_str(), NOT_SPECIFIED)),
            ("education", field(profile.education.as_str(), NOT_SPECIFIED)),
            ("goals", field(profile.goals.as_str(), NOT_SPECIFIED)),
        ],
    );

    let mut sections = vec![profile_block];

    if has_preferences(profile) {
        sections.push(render(
            PREFERENCES_TEMPLATE,
            &[
                ("preferred_roles", optional(&profile.preferred_roles)),
                ("target_domain", optional(&profile.target_domain)),
                ("location_preference", optional(&profile.location_preference)),
                ("work_style", optional(&profile.work_style)),
                ("risk_preference", optional(&profile.risk_preference)),
                ("priority", optional(&profile.priority)),
                ("notes", optional(&profile.notes)),
            ],
        ));
    }

    sections.push(mode.task().to_string());
    sections.push(FORMAT_INSTRUCTION.to_string());

    sections.join("\n\n")
}

fn has_preferences(profile: &UserProfile) -> bool {
    [
        &profile.preferred_roles,
        &profile.target_domain,
        &profile.location_preference,
        &profile.work_style,
        &profile.risk_preference,
        &profile.priority,
        &profile.notes,
    ]
    .iter()
    .any(|v| v.as_deref().is_some_and(|s| !s.trim().is_empty()))
}

/// Single-pass `{key}` substitution. Values are never re-scanned, so user text
/// containing braces cannot pull in another field.
fn render(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let hit = after.find('}').and_then(|end| {
            let key = &after[..end];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (v, end))
        });
        match hit {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
