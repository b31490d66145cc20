//! Regulation-name alignment check.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::input::PolicyDocument;

/// Which named regulations a document's content mentions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentReport {
    pub aligned: Vec<String>,
    pub not_aligned: Vec<String>,
}

impl AlignmentReport {
    /// True when every regulation is mentioned.
    pub fn is_fully_aligned(&self) -> bool {
        self.not_aligned.is_empty()
    }
}

/// Split `regulations` by whether each appears (case-insensitively) in the content.
///
/// Input order is kept in both lists.
pub fn check_alignment<S: AsRef<str>>(document: &PolicyDocument, regulations: &[S]) -> AlignmentReport {
    let content = document.content.to_lowercase();
    let (aligned, not_aligned): (Vec<String>, Vec<String>) = regulations
        .iter()
        .map(|r| r.as_ref().to_string())
        .partition(|r| content.contains(&r.to_lowercase()));

    debug!(
        aligned = aligned.len(),
        not_aligned = not_aligned.len(),
        "regulatory alignment checked"
    );

    AlignmentReport {
        aligned,
        not_aligned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_split() {
        let doc = PolicyDocument::new(
            "coverage_policy",
            "Claims follow 42 CFR Part 411 and the hipaa Privacy Rule.",
        );
        let report = check_alignment(&doc, &["HIPAA", "21 CFR Part 11", "42 cfr part 411"]);

        assert_eq!(report.aligned, vec!["HIPAA", "42 cfr part 411"]);
        assert_eq!(report.not_aligned, vec!["21 CFR Part 11"]);
        assert!(!report.is_fully_aligned());
    }

    #[test]
    fn test_no_regulations() {
        let doc = PolicyDocument::new("coverage_policy", "anything");
        let report = check_alignment::<&str>(&doc, &[]);
        assert!(report.is_fully_aligned());
        assert!(report.aligned.is_empty());
    }
}
