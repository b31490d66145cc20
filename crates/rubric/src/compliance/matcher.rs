//! Required-section and keyword detection for one framework.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::PolicyDocument;

use super::framework::ComplianceFramework;

/// What a document has and lacks for one framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub present_sections: Vec<String>,
    /// Absent, or present with whitespace-only text.
    pub missing_sections: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
}

impl MatchOutcome {
    pub fn sections_total(&self) -> usize {
        self.present_sections.len() + self.missing_sections.len()
    }

    /// Present over required sections; 1.0 when nothing is required.
    pub fn section_ratio(&self) -> f64 {
        let total = self.sections_total();
        if total == 0 {
            return 1.0;
        }
        self.present_sections.len() as f64 / total as f64
    }

    /// Matched over defined keywords; 1.0 when the framework defines none.
    pub fn keyword_coverage(&self) -> f64 {
        let total = self.matched_keywords.len() + self.missing_keywords.len();
        if total == 0 {
            return 1.0;
        }
        self.matched_keywords.len() as f64 / total as f64
    }
}

/// Detects required sections in `components` and keywords in `content`.
pub struct SectionMatcher;

impl SectionMatcher {
    /// Evaluate a document against one framework.
    pub fn evaluate(document: &PolicyDocument, framework: &ComplianceFramework) -> Result<MatchOutcome> {
        let components = document.components()?;
        let content = document.content.to_lowercase();
        Ok(Self::evaluate_parts(components, &content, framework))
    }

    /// Evaluate with the components mapping and the already lower-cased content.
    pub fn evaluate_parts(
        components: &IndexMap<String, String>,
        content_lower: &str,
        framework: &ComplianceFramework,
    ) -> MatchOutcome {
        let (present_sections, missing_sections): (Vec<String>, Vec<String>) = framework
            .required_sections
            .iter()
            .cloned()
            .partition(|section| {
                components
                    .get(section)
                    .is_some_and(|text| !text.trim().is_empty())
            });

        let (matched_keywords, missing_keywords): (Vec<String>, Vec<String>) = framework
            .keywords
            .iter()
            .cloned()
            .partition(|keyword| content_lower.contains(&keyword.to_lowercase()));

        MatchOutcome {
            present_sections,
            missing_sections,
            matched_keywords,
            missing_keywords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framework() -> ComplianceFramework {
        ComplianceFramework::new("test")
            .with_sections(vec!["policy_statement", "clinical_guidelines", "references"])
            .with_keywords(vec!["Evidence-Based", "efficacy", "reimbursement"])
    }

    #[test]
    fn test_sections_and_keywords() {
        let doc = PolicyDocument::new(
            "clinical_policy",
            "An EVIDENCE-BASED approach with proven efficacy.",
        )
        .with_component("policy_statement", "Patients with type 2 diabetes...")
        .with_component("clinical_guidelines", "Follow ADA guidance.");

        let outcome = SectionMatcher::evaluate(&doc, &framework()).unwrap();

        assert_eq!(outcome.missing_sections, vec!["references"]);
        assert_eq!(outcome.sections_total(), 3);
        assert!((outcome.section_ratio() - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(outcome.matched_keywords, vec!["Evidence-Based", "efficacy"]);
        assert_eq!(outcome.missing_keywords, vec!["reimbursement"]);
    }

    #[test]
    fn test_whitespace_section_counts_as_missing() {
        let doc = PolicyDocument::new("clinical_policy", "")
            .with_component("policy_statement", "  \n\t ")
            .with_component("clinical_guidelines", "text")
            .with_component("references", "text");

        let outcome = SectionMatcher::evaluate(&doc, &framework()).unwrap();
        assert_eq!(outcome.missing_sections, vec!["policy_statement"]);
    }

    #[test]
    fn test_empty_framework_is_fully_covered() {
        let doc = PolicyDocument::new("clinical_policy", "");
        let outcome = SectionMatcher::evaluate(&doc, &ComplianceFramework::new("empty")).unwrap();

        assert_eq!(outcome.section_ratio(), 1.0);
        assert_eq!(outcome.keyword_coverage(), 1.0);
    }

    #[test]
    fn test_document_without_components() {
        let doc = PolicyDocument {
            policy_type: "clinical_policy".to_string(),
            content: String::new(),
            components: None,
        };
        assert!(SectionMatcher::evaluate(&doc, &framework()).is_err());
    }
}
