//! Issues and warnings raised while scoring a document.

use serde::{Deserialize, Serialize};

/// Kind of compliance finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// A required section is absent or empty.
    MissingSection,
    /// Keyword coverage is below the framework minimum.
    LowKeywordCoverage,
}

impl FindingKind {
    /// Get a human-readable label for the finding kind.
    pub fn label(&self) -> &'static str {
        match self {
            FindingKind::MissingSection => "Missing Section",
            FindingKind::LowKeywordCoverage => "Low Keyword Coverage",
        }
    }
}

/// Severity level of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory; does not block compliance on its own.
    Warning,
    /// Blocks a compliant verdict.
    Error,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

/// One issue or warning against one framework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub severity: Severity,
    pub framework: String,
    /// Section identifier, or `keywords` for coverage findings.
    pub subject: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_keywords: Vec<String>,
}

impl Finding {
    /// A required section that is absent or empty.
    pub fn missing_section(framework: impl Into<String>, section: impl Into<String>) -> Self {
        let framework = framework.into();
        let section = section.into();
        Self {
            kind: FindingKind::MissingSection,
            severity: Severity::Error,
            description: format!("Missing required section '{}' for {}", section, framework),
            subject: section,
            framework,
            coverage: None,
            threshold: None,
            missing_keywords: Vec::new(),
        }
    }

    /// Keyword coverage below the framework's minimum.
    pub fn low_keyword_coverage(
        framework: impl Into<String>,
        coverage: f64,
        threshold: f64,
        missing_keywords: Vec<String>,
    ) -> Self {
        let framework = framework.into();
        Self {
            kind: FindingKind::LowKeywordCoverage,
            severity: Severity::Warning,
            description: format!(
                "{} keyword coverage is {:.0}%, below the {:.0}% minimum",
                framework,
                coverage * 100.0,
                threshold * 100.0
            ),
            subject: "keywords".to_string(),
            framework,
            coverage: Some(coverage),
            threshold: Some(threshold),
            missing_keywords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_section_finding() {
        let finding = Finding::missing_section("fda_guidelines", "references");

        assert_eq!(finding.kind, FindingKind::MissingSection);
        assert_eq!(finding.severity, Severity::Error);
        assert_eq!(finding.subject, "references");
        assert_eq!(
            finding.description,
            "Missing required section 'references' for fda_guidelines"
        );
    }

    #[test]
    fn test_coverage_finding() {
        let finding = Finding::low_keyword_coverage(
            "hipaa_compliance",
            0.2,
            0.5,
            vec!["hipaa".to_string()],
        );

        assert_eq!(finding.severity, Severity::Warning);
        assert!(finding.description.contains("20%"));
        assert!(finding.description.contains("50%"));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Warning < Severity::Error);
    }
}
