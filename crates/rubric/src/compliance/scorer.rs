//! Per-framework and aggregate compliance scoring.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, RubricError};
use crate::input::PolicyDocument;

use super::finding::Finding;
use super::framework::{ComplianceFramework, FrameworkRegistry};
use super::matcher::SectionMatcher;
use super::recommendation::{Recommendation, RecommendationEngine};

/// Weights and aggregate thresholds for compliance scoring.
///
/// A framework scores `section_weight * section_ratio + keyword_weight * coverage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub section_weight: f64,
    pub keyword_weight: f64,
    /// Aggregate score needed (with every framework compliant) for `compliant`.
    pub compliant_threshold: f64,
    /// Aggregate score needed for `needs_revision` rather than `non_compliant`.
    pub revision_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            section_weight: 0.6,
            keyword_weight: 0.4,
            compliant_threshold: 0.9,
            revision_threshold: 0.5,
        }
    }
}

impl ScoringConfig {
    /// Check weights and thresholds.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("section_weight", self.section_weight),
            ("keyword_weight", self.keyword_weight),
            ("compliant_threshold", self.compliant_threshold),
            ("revision_threshold", self.revision_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(RubricError::Config(format!(
                    "scoring.{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        if ((self.section_weight + self.keyword_weight) - 1.0).abs() > 1e-9 {
            return Err(RubricError::Config(format!(
                "scoring weights must sum to 1, got {} + {}",
                self.section_weight, self.keyword_weight
            )));
        }
        if self.revision_threshold > self.compliant_threshold {
            return Err(RubricError::Config(
                "scoring.revision_threshold exceeds scoring.compliant_threshold".to_string(),
            ));
        }
        Ok(())
    }
}

/// Overall verdict for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    NeedsRevision,
    NonCompliant,
}

impl ComplianceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "Compliant",
            ComplianceStatus::NeedsRevision => "Needs Revision",
            ComplianceStatus::NonCompliant => "Non-Compliant",
        }
    }
}

/// Result for one framework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkResult {
    pub framework: String,
    pub compliant: bool,
    pub score: f64,
    pub missing_sections: Vec<String>,
    /// Coverage warnings for this framework.
    pub warnings: Vec<Finding>,
    pub sections_present: usize,
    pub sections_total: usize,
    pub keyword_coverage: f64,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
}

/// Full compliance report for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub policy_type: String,
    pub overall_status: ComplianceStatus,
    pub overall_score: f64,
    pub framework_results: IndexMap<String, FrameworkResult>,
    pub issues: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub recommendations: Vec<Recommendation>,
}

impl ValidationResult {
    pub fn framework(&self, name: &str) -> Option<&FrameworkResult> {
        self.framework_results.get(name)
    }

    pub fn is_compliant(&self) -> bool {
        self.overall_status == ComplianceStatus::Compliant
    }
}

/// Scores documents against frameworks from a registry.
pub struct ComplianceScorer<'a> {
    registry: &'a FrameworkRegistry,
    config: &'a ScoringConfig,
}

impl<'a> ComplianceScorer<'a> {
    pub fn new(registry: &'a FrameworkRegistry, config: &'a ScoringConfig) -> Self {
        Self { registry, config }
    }

    /// Validate against every registered framework.
    pub fn validate(&self, document: &PolicyDocument) -> Result<ValidationResult> {
        let selected: Vec<&ComplianceFramework> = self.registry.iter().collect();
        self.run(document, &selected)
    }

    /// Validate against the named frameworks only.
    ///
    /// Every name is resolved before any scoring; an unknown name fails the
    /// call without producing a report.
    pub fn validate_frameworks<S: AsRef<str>>(
        &self,
        document: &PolicyDocument,
        names: &[S],
    ) -> Result<ValidationResult> {
        let selected = self.registry.resolve(names)?;
        self.run(document, &selected)
    }

    fn run(
        &self,
        document: &PolicyDocument,
        frameworks: &[&ComplianceFramework],
    ) -> Result<ValidationResult> {
        let components = document.components()?;
        let content = document.content.to_lowercase();

        let results = self.score_all(frameworks, |framework| {
            self.score_framework(framework, components, &content)
        });

        let overall_score = if results.is_empty() {
            0.0
        } else {
            results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64
        };
        let all_compliant = results.iter().all(|r| r.compliant);
        let overall_status = self.overall_status(overall_score, all_compliant, results.is_empty());

        let issues: Vec<Finding> = results
            .iter()
            .flat_map(|r| {
                r.missing_sections
                    .iter()
                    .map(|section| Finding::missing_section(&r.framework, section))
            })
            .collect();
        let warnings: Vec<Finding> = results
            .iter()
            .filter(|r| r.missing_sections.is_empty())
            .flat_map(|r| r.warnings.iter().cloned())
            .collect();
        let recommendations = RecommendationEngine::generate(&issues, &warnings);

        info!(
            policy_type = %document.policy_type,
            frameworks = results.len(),
            status = overall_status.label(),
            score = overall_score,
            issues = issues.len(),
            warnings = warnings.len(),
            "policy validated"
        );

        Ok(ValidationResult {
            policy_type: document.policy_type.clone(),
            overall_status,
            overall_score,
            framework_results: results
                .into_iter()
                .map(|r| (r.framework.clone(), r))
                .collect(),
            issues,
            warnings,
            recommendations,
        })
    }

    #[cfg(not(feature = "parallel"))]
    fn score_all<F>(&self, frameworks: &[&ComplianceFramework], score: F) -> Vec<FrameworkResult>
    where
        F: Fn(&ComplianceFramework) -> FrameworkResult + Sync,
    {
        frameworks.iter().map(|f| score(*f)).collect()
    }

    #[cfg(feature = "parallel")]
    fn score_all<F>(&self, frameworks: &[&ComplianceFramework], score: F) -> Vec<FrameworkResult>
    where
        F: Fn(&ComplianceFramework) -> FrameworkResult + Sync,
    {
        use rayon::prelude::*;

        frameworks.par_iter().map(|f| score(*f)).collect()
    }

    fn score_framework(
        &self,
        framework: &ComplianceFramework,
        components: &IndexMap<String, String>,
        content_lower: &str,
    ) -> FrameworkResult {
        let outcome = SectionMatcher::evaluate_parts(components, content_lower, framework);
        let coverage = outcome.keyword_coverage();
        let score = (self.config.section_weight * outcome.section_ratio()
            + self.config.keyword_weight * coverage)
            .clamp(0.0, 1.0);

        // Missing sections are a hard gate; score alone never makes a framework compliant.
        let compliant =
            score >= framework.compliance_threshold && outcome.missing_sections.is_empty();

        let mut warnings = Vec::new();
        if coverage < framework.min_keyword_coverage {
            warnings.push(Finding::low_keyword_coverage(
                &framework.name,
                coverage,
                framework.min_keyword_coverage,
                outcome.missing_keywords.clone(),
            ));
        }

        debug!(
            framework = %framework.name,
            score,
            coverage,
            missing_sections = outcome.missing_sections.len(),
            compliant,
            "framework scored"
        );

        FrameworkResult {
            framework: framework.name.clone(),
            compliant,
            score,
            sections_present: outcome.present_sections.len(),
            sections_total: outcome.sections_total(),
            keyword_coverage: coverage,
            missing_sections: outcome.missing_sections,
            warnings,
            matched_keywords: outcome.matched_keywords,
            missing_keywords: outcome.missing_keywords,
        }
    }

    fn overall_status(&self, score: f64, all_compliant: bool, nothing_checked: bool) -> ComplianceStatus {
        if nothing_checked {
            ComplianceStatus::NonCompliant
        } else if score >= self.config.compliant_threshold && all_compliant {
            ComplianceStatus::Compliant
        } else if score >= self.config.revision_threshold {
            ComplianceStatus::NeedsRevision
        } else {
            ComplianceStatus::NonCompliant
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_registry() -> FrameworkRegistry {
        FrameworkRegistry::new(vec![
            ComplianceFramework::new("clinical")
                .with_sections(vec!["policy_statement", "clinical_guidelines", "references"])
                .with_keywords(vec!["evidence-based", "efficacy"]),
        ])
        .unwrap()
    }

    fn scenario_document() -> PolicyDocument {
        PolicyDocument::new(
            "clinical_policy",
            "This evidence-based policy reviews the efficacy of metformin.",
        )
        .with_component("policy_statement", "Patients with type 2 diabetes...")
        .with_component("clinical_guidelines", "...")
    }

    #[test]
    fn test_missing_reference_scenario() {
        let registry = scenario_registry();
        let config = ScoringConfig::default();
        let result = ComplianceScorer::new(&registry, &config)
            .validate(&scenario_document())
            .unwrap();

        let framework = result.framework("clinical").unwrap();
        assert_eq!(framework.missing_sections, vec!["references"]);
        assert_eq!(framework.sections_present, 2);
        assert_eq!(framework.keyword_coverage, 1.0);
        assert!((framework.score - 0.8).abs() < 1e-9);
        assert!(!framework.compliant);

        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].subject, "references");
        assert_eq!(result.overall_status, ComplianceStatus::NeedsRevision);
        assert_eq!(result.recommendations.len(), 1);
    }

    #[test]
    fn test_full_document_is_compliant() {
        let registry = scenario_registry();
        let config = ScoringConfig::default();
        let document = scenario_document().with_component("references", "ADA 2024.");

        let result = ComplianceScorer::new(&registry, &config).validate(&document).unwrap();

        assert_eq!(result.overall_score, 1.0);
        assert_eq!(result.overall_status, ComplianceStatus::Compliant);
        assert!(result.issues.is_empty());
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_high_score_with_missing_section_not_compliant() {
        let registry = FrameworkRegistry::new(vec![
            ComplianceFramework::new("lenient")
                .with_sections(vec!["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"])
                .with_keywords(vec!["x"])
                .with_compliance_threshold(0.5),
        ])
        .unwrap();
        let config = ScoringConfig::default();
        let mut document = PolicyDocument::new("clinical_policy", "x");
        for section in ["a", "b", "c", "d", "e", "f", "g", "h", "i"] {
            document = document.with_component(section, "text");
        }

        let result = ComplianceScorer::new(&registry, &config).validate(&document).unwrap();
        let framework = result.framework("lenient").unwrap();

        assert!(framework.score > 0.9);
        assert!(!framework.compliant);
        assert_ne!(result.overall_status, ComplianceStatus::Compliant);
    }

    #[test]
    fn test_coverage_warning_only_merged_when_sections_present() {
        let registry = FrameworkRegistry::new(vec![
            ComplianceFramework::new("complete")
                .with_sections(vec!["privacy"])
                .with_keywords(vec!["hipaa", "phi", "consent"]),
            ComplianceFramework::new("incomplete")
                .with_sections(vec!["security"])
                .with_keywords(vec!["encryption", "audit"]),
        ])
        .unwrap();
        let config = ScoringConfig::default();
        let document = PolicyDocument::new("clinical_policy", "General text.")
            .with_component("privacy", "Data is protected.");

        let result = ComplianceScorer::new(&registry, &config).validate(&document).unwrap();

        assert_eq!(result.framework("complete").unwrap().warnings.len(), 1);
        assert_eq!(result.framework("incomplete").unwrap().warnings.len(), 1);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].framework, "complete");
        assert_eq!(result.issues.len(), 1);
        // one per issue plus one per merged warning
        assert_eq!(result.recommendations.len(), 2);
    }

    #[test]
    fn test_unknown_framework_fails_fast() {
        let registry = FrameworkRegistry::builtin();
        let config = ScoringConfig::default();
        let err = ComplianceScorer::new(&registry, &config)
            .validate_frameworks(&scenario_document(), &["fda_guidelines", "eu_mdr"])
            .unwrap_err();

        assert!(matches!(err, RubricError::UnknownFramework { ref name } if name == "eu_mdr"));
    }

    #[test]
    fn test_repeated_framework_names_scored_once() {
        let registry = FrameworkRegistry::builtin();
        let config = ScoringConfig::default();
        let scorer = ComplianceScorer::new(&registry, &config);
        let document = PolicyDocument::new("clinical_policy", "HIPAA privacy and consent.")
            .with_component("privacy", "text");

        let single = scorer
            .validate_frameworks(&document, &["hipaa_compliance", "fda_guidelines"])
            .unwrap();
        let repeated = scorer
            .validate_frameworks(
                &document,
                &["hipaa_compliance", "fda_guidelines", "fda_guidelines"],
            )
            .unwrap();

        assert_eq!(repeated.framework_results.len(), 2);
        assert_eq!(repeated.overall_score, single.overall_score);
        assert_eq!(repeated.overall_status, single.overall_status);
        assert_eq!(repeated.issues.len(), single.issues.len());
        assert_eq!(repeated.recommendations.len(), single.recommendations.len());
        assert_eq!(repeated, single);
    }

    #[test]
    fn test_selected_frameworks_only() {
        let registry = FrameworkRegistry::builtin();
        let config = ScoringConfig::default();
        let result = ComplianceScorer::new(&registry, &config)
            .validate_frameworks(&scenario_document(), &["hipaa_compliance"])
            .unwrap();

        assert_eq!(result.framework_results.len(), 1);
        assert!(result.framework("fda_guidelines").is_none());
    }

    #[test]
    fn test_zero_sections_contribute_full_term() {
        let registry = FrameworkRegistry::new(vec![
            ComplianceFramework::new("keywords_only").with_keywords(vec!["safety", "quality"]),
        ])
        .unwrap();
        let config = ScoringConfig::default();
        let document = PolicyDocument::new("clinical_policy", "Safety first.");

        let result = ComplianceScorer::new(&registry, &config).validate(&document).unwrap();
        let framework = result.framework("keywords_only").unwrap();

        assert!((framework.score - 0.8).abs() < 1e-9);
        assert!(framework.compliant);
    }

    #[test]
    fn test_low_aggregate_is_non_compliant() {
        let registry = FrameworkRegistry::builtin();
        let config = ScoringConfig::default();
        let document = PolicyDocument::new("clinical_policy", "");

        let result = ComplianceScorer::new(&registry, &config).validate(&document).unwrap();

        assert_eq!(result.overall_score, 0.0);
        assert_eq!(result.overall_status, ComplianceStatus::NonCompliant);
        assert_eq!(result.issues.len(), 13);
    }

    #[test]
    fn test_config_validation() {
        assert!(ScoringConfig::default().validate().is_ok());

        let bad_weights = ScoringConfig {
            section_weight: 0.7,
            ..ScoringConfig::default()
        };
        assert!(bad_weights.validate().is_err());

        let inverted = ScoringConfig {
            compliant_threshold: 0.4,
            ..ScoringConfig::default()
        };
        assert!(inverted.validate().is_err());
    }
}
