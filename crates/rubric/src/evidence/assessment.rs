//! Adequacy check for a synthesis used as the evidence base of a policy.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::synthesis::EvidenceSynthesis;

/// Thresholds for judging an evidence base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentConfig {
    /// Fewer records than this is a limited evidence base.
    pub min_records: usize,
    /// Fewer high-tier records than this draws a warning.
    pub min_high_quality: usize,
    /// High-tier share below this, combined with a limited base, fails.
    pub min_quality_score: f64,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            min_records: 5,
            min_high_quality: 3,
            min_quality_score: 0.3,
        }
    }
}

/// Outcome of an evidence-base assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentStatus {
    Pass,
    Warning,
    Fail,
}

impl AssessmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AssessmentStatus::Pass => "Pass",
            AssessmentStatus::Warning => "Warning",
            AssessmentStatus::Fail => "Fail",
        }
    }
}

/// Result of assessing an evidence base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceAssessment {
    pub status: AssessmentStatus,
    /// Share of high-tier records (0.0-1.0).
    pub quality_score: f64,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}

/// Judges whether a synthesis is strong enough to support a policy draft.
#[derive(Debug, Clone, Default)]
pub struct EvidenceAssessor {
    config: AssessmentConfig,
}

impl EvidenceAssessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AssessmentConfig) -> Self {
        Self { config }
    }

    /// Assess the record count and high-tier share of a synthesis.
    pub fn assess(&self, synthesis: &EvidenceSynthesis) -> EvidenceAssessment {
        let total = synthesis.total_count;
        let high = synthesis.tier_counts.high;

        if total == 0 {
            return EvidenceAssessment {
                status: AssessmentStatus::Fail,
                quality_score: 0.0,
                issues: vec!["No evidence records found.".to_string()],
                warnings: Vec::new(),
            };
        }

        let quality_score = synthesis.high_tier_share();
        let limited = total < self.config.min_records;
        let mut issues = Vec::new();
        let mut warnings = Vec::new();

        if limited {
            warnings.push(format!(
                "Limited evidence base ({} records). Consider expanding the literature search.",
                total
            ));
        }

        if high == 0 {
            warnings.push(
                "No high-quality evidence found. The policy may lack strong support.".to_string(),
            );
        } else if high < self.config.min_high_quality {
            warnings.push(format!(
                "Only {} high-quality record(s) found. Consider seeking additional high-quality evidence.",
                high
            ));
        }

        let status = if quality_score < self.config.min_quality_score && limited {
            issues.push("Insufficient high-quality evidence to support the policy.".to_string());
            AssessmentStatus::Fail
        } else if !warnings.is_empty() {
            AssessmentStatus::Warning
        } else {
            AssessmentStatus::Pass
        };

        debug!(
            topic = %synthesis.topic,
            status = status.label(),
            quality_score,
            "evidence base assessed"
        );

        EvidenceAssessment {
            status,
            quality_score,
            issues,
            warnings,
        }
    }
}
