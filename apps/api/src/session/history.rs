use crate::advice::builder::PromptMode;
use crate::advice::generator::{AdviceText, GenerationError};
use crate::models::advice::AdviceResult;
use crate::models::profile::UserProfile;

/// Insertion-ordered advice log for one session. Entries are never edited;
/// the only removal is `clear`, which empties everything.
#[derive(Debug, Default, Clone)]
pub struct SessionHistory {
    entries: Vec<AdviceResult>,
}

impl SessionHistory {
    /// Wraps an outcome in an `AdviceResult` numbered after the current tail and appends it.
    pub fn record(
        &mut self,
        profile: UserProfile,
        mode: PromptMode,
        outcome: Result<AdviceText, GenerationError>,
    ) -> &AdviceResult {
        let result = AdviceResult::new(profile, mode, outcome, self.entries.len() + 1);
        self.append(result)
    }

    pub fn append(&mut self, result: AdviceResult) -> &AdviceResult {
        self.entries.push(result);
        &self.entries[self.entries.len() - 1]
    }

    /// Most-recent-last.
    pub fn list(&self) -> &[AdviceResult] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&AdviceResult> {
        self.entries.last()
    }

    /// Empties the history and returns how many entries were dropped.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::advice::AdviceStatus;
    use crate::test_utils::sample_profile;

    fn ok(text: &str) -> Result<AdviceText, GenerationError> {
        Ok(AdviceText(text.to_string()))
    }

    #[test]
    fn test_list_is_in_submission_order() {
        let mut history = SessionHistory::default();
        for i in 1..=4 {
            history.record(sample_profile(), PromptMode::Career, ok(&format!("advice {i}")));
        }

        let texts: Vec<&str> = history.list().iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["advice 1", "advice 2", "advice 3", "advice 4"]);
        assert_eq!(history.latest().unwrap().text, "advice 4");
        assert_eq!(history.list()[1].title, "Asha's Plan #2");
    }

    #[test]
    fn test_failures_are_recorded_like_any_other_result() {
        let mut history = SessionHistory::default();
        history.record(sample_profile(), PromptMode::Career, ok("fine"));
        history.record(
            sample_profile(),
            PromptMode::Career,
            Err(GenerationError::Transport("timed out".to_string())),
        );

        assert_eq!(history.len(), 2);
        let last = history.latest().unwrap();
        assert_eq!(last.status, AdviceStatus::Failed);
        assert!(last.text.contains("Error"));
    }

    #[test]
    fn test_clear_empties_regardless_of_count() {
        let mut history = SessionHistory::default();
        for _ in 0..3 {
            history.record(sample_profile(), PromptMode::Chart, ok("x"));
        }
        assert_eq!(history.clear(), 3);
        assert!(history.is_empty());
        assert_eq!(history.list().len(), 0);
        assert!(history.latest().is_none());

        assert_eq!(history.clear(), 0);
    }

    #[test]
    fn test_numbering_restarts_after_clear() {
        let mut history = SessionHistory::default();
        history.record(sample_profile(), PromptMode::Career, ok("a"));
        history.clear();
        let entry = history.record(sample_profile(), PromptMode::Career, ok("b"));
        assert_eq!(entry.title, "Asha's Plan #1");
    }
}
