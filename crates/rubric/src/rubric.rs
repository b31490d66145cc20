//! Main Rubric struct and public API.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compliance::{
    AlignmentReport, ComplianceScorer, FrameworkDefaults, FrameworkDefinition, FrameworkRegistry,
    ScoringConfig, ValidationResult, check_alignment,
};
use crate::error::{Result, RubricError};
use crate::evidence::{
    AssessmentConfig, EvidenceAssessment, EvidenceAssessor, EvidenceSynthesis,
    EvidenceSynthesizer, QualityClassifier, SynthesisConfig, TierLexicon,
};
use crate::input::{LiteratureRecord, PolicyDocument, read_json};

/// Configuration for both engines.
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RubricConfig {
    /// Key-finding extraction limits.
    pub synthesis: SynthesisConfig,
    /// Score weights and aggregate status thresholds.
    pub scoring: ScoringConfig,
    /// Evidence-base assessment thresholds.
    pub assessment: AssessmentConfig,
    /// Study-design phrases per tier.
    pub lexicon: TierLexicon,
    /// Thresholds for frameworks that do not set their own.
    pub framework_defaults: FrameworkDefaults,
    /// Replaces the built-in frameworks when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frameworks: Option<Vec<FrameworkDefinition>>,
}

impl RubricConfig {
    /// Parse configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path)
    }

    /// Check global thresholds. Frameworks are checked when the registry is built.
    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;

        let unit_fields = [
            (
                "framework_defaults.compliance_threshold",
                self.framework_defaults.compliance_threshold,
            ),
            (
                "framework_defaults.min_keyword_coverage",
                self.framework_defaults.min_keyword_coverage,
            ),
            ("assessment.min_quality_score", self.assessment.min_quality_score),
        ];
        for (name, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(RubricError::Config(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// The evidence synthesis and compliance scoring engine.
///
/// Built once from a [`RubricConfig`] and never mutated; every method is a
/// pure function of its arguments and that configuration.
///
/// ```
/// use rubric::Rubric;
/// use rubric::input::{LiteratureRecord, PolicyDocument};
///
/// let rubric = Rubric::new();
///
/// let records = vec![LiteratureRecord::new("1", "A cohort study of statin adherence")];
/// let synthesis = rubric.synthesize(&records, "statin").unwrap();
/// assert_eq!(synthesis.total_count, 1);
///
/// let doc = PolicyDocument::new("clinical_policy", "HIPAA privacy applies.");
/// let result = rubric.validate_frameworks(&doc, &["hipaa_compliance"]).unwrap();
/// assert_eq!(result.framework_results.len(), 1);
/// ```
pub struct Rubric {
    config: RubricConfig,
    synthesizer: EvidenceSynthesizer,
    assessor: EvidenceAssessor,
    registry: FrameworkRegistry,
}

impl Rubric {
    /// Create an engine with the default configuration and built-in frameworks.
    pub fn new() -> Self {
        let config = RubricConfig::default();
        Self {
            synthesizer: EvidenceSynthesizer::with_config(
                QualityClassifier::new(),
                config.synthesis.clone(),
            ),
            assessor: EvidenceAssessor::with_config(config.assessment.clone()),
            registry: FrameworkRegistry::builtin(),
            config,
        }
    }

    /// Create an engine from custom configuration.
    ///
    /// Fails on out-of-range thresholds, weights that do not sum to one, blank
    /// lexicon phrases, or invalid framework definitions.
    pub fn with_config(config: RubricConfig) -> Result<Self> {
        config.validate()?;

        let classifier = QualityClassifier::with_lexicon(&config.lexicon)?;
        let registry = match &config.frameworks {
            Some(definitions) => {
                FrameworkRegistry::from_definitions(definitions.clone(), &config.framework_defaults)?
            }
            None => FrameworkRegistry::builtin_with(&config.framework_defaults),
        };
        debug!(frameworks = registry.len(), "engine configured");

        Ok(Self {
            synthesizer: EvidenceSynthesizer::with_config(classifier, config.synthesis.clone()),
            assessor: EvidenceAssessor::with_config(config.assessment.clone()),
            registry,
            config,
        })
    }

    /// Classify, score and aggregate literature records for a topic.
    pub fn synthesize(&self, records: &[LiteratureRecord], topic: &str) -> Result<EvidenceSynthesis> {
        self.synthesizer.synthesize(records, topic)
    }

    /// Validate a document against every registered framework.
    pub fn validate(&self, document: &PolicyDocument) -> Result<ValidationResult> {
        self.scorer().validate(document)
    }

    /// Validate a document against the named frameworks.
    pub fn validate_frameworks<S: AsRef<str>>(
        &self,
        document: &PolicyDocument,
        frameworks: &[S],
    ) -> Result<ValidationResult> {
        self.scorer().validate_frameworks(document, frameworks)
    }

    /// Judge a synthesis as an evidence base.
    pub fn assess(&self, synthesis: &EvidenceSynthesis) -> EvidenceAssessment {
        self.assessor.assess(synthesis)
    }

    /// Report which regulations the document content mentions.
    pub fn check_alignment<S: AsRef<str>>(
        &self,
        document: &PolicyDocument,
        regulations: &[S],
    ) -> AlignmentReport {
        check_alignment(document, regulations)
    }

    pub fn registry(&self) -> &FrameworkRegistry {
        &self.registry
    }

    pub fn config(&self) -> &RubricConfig {
        &self.config
    }

    fn scorer(&self) -> ComplianceScorer<'_> {
        ComplianceScorer::new(&self.registry, &self.config.scoring)
    }
}

impl Default for Rubric {
    fn default() -> Self {
        Self::new()
    }
}
