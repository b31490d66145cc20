//! Rule-based remediation lines for compliance findings.
//!
//! Every issue and every warning yields exactly one templated
//! recommendation; nothing here is model-generated.

use serde::{Deserialize, Serialize};

use super::finding::{Finding, FindingKind};

/// How many missing keywords a coverage recommendation names.
const KEYWORDS_TO_SUGGEST: usize = 3;

/// A remediation step for one finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub finding_kind: FindingKind,
    pub framework: String,
    pub subject: String,
    /// 1 = highest.
    pub priority: u8,
    pub text: String,
}

/// Generates recommendations from findings.
pub struct RecommendationEngine;

impl RecommendationEngine {
    /// One recommendation per issue, then one per warning.
    pub fn generate(issues: &[Finding], warnings: &[Finding]) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> = issues
            .iter()
            .chain(warnings.iter())
            .map(Self::recommend)
            .collect();

        // Stable: within a priority, finding order is kept.
        recommendations.sort_by_key(|r| r.priority);
        recommendations
    }

    fn recommend(finding: &Finding) -> Recommendation {
        match finding.kind {
            FindingKind::MissingSection => Self::suggest_add_section(finding),
            FindingKind::LowKeywordCoverage => Self::suggest_strengthen_keywords(finding),
        }
    }

    fn suggest_add_section(finding: &Finding) -> Recommendation {
        Recommendation {
            finding_kind: finding.kind,
            framework: finding.framework.clone(),
            subject: finding.subject.clone(),
            priority: 1,
            text: format!(
                "Add a non-empty '{}' section to meet {} requirements.",
                finding.subject, finding.framework
            ),
        }
    }

    fn suggest_strengthen_keywords(finding: &Finding) -> Recommendation {
        let mut text = format!(
            "Strengthen alignment with {}: keyword coverage is {:.0}% (minimum {:.0}%).",
            finding.framework,
            finding.coverage.unwrap_or(0.0) * 100.0,
            finding.threshold.unwrap_or(0.0) * 100.0
        );
        if !finding.missing_keywords.is_empty() {
            let suggested: Vec<&str> = finding
                .missing_keywords
                .iter()
                .take(KEYWORDS_TO_SUGGEST)
                .map(String::as_str)
                .collect();
            text.push_str(&format!(" Consider addressing: {}.", suggested.join(", ")));
        }

        Recommendation {
            finding_kind: finding.kind,
            framework: finding.framework.clone(),
            subject: finding.subject.clone(),
            priority: 2,
            text,
        }
    }
}
