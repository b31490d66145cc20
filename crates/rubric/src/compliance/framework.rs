//! Regulatory framework definitions and the registry that holds them.
//!
//! Four frameworks ship by default, mirroring the rule tables the drafting
//! workflow has always checked against. Additional frameworks are pure data:
//! supply [`FrameworkDefinition`]s (typically from JSON) and build a registry
//! from them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RubricError};

/// Score a framework must reach for a compliant verdict unless it sets its own.
pub const DEFAULT_COMPLIANCE_THRESHOLD: f64 = 0.75;

/// Keyword coverage below which a framework raises a warning unless it sets its own.
pub const DEFAULT_MIN_KEYWORD_COVERAGE: f64 = 0.5;

/// Names of the built-in frameworks, in registry order.
pub static BUILTIN_FRAMEWORKS: &[&str] = &[
    "fda_guidelines",
    "cms_requirements",
    "hipaa_compliance",
    "clinical_standards",
];

/// Thresholds applied to frameworks that do not define their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkDefaults {
    pub compliance_threshold: f64,
    pub min_keyword_coverage: f64,
}

impl Default for FrameworkDefaults {
    fn default() -> Self {
        Self {
            compliance_threshold: DEFAULT_COMPLIANCE_THRESHOLD,
            min_keyword_coverage: DEFAULT_MIN_KEYWORD_COVERAGE,
        }
    }
}

/// A named regulatory rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceFramework {
    /// Registry key (e.g. `hipaa_compliance`).
    pub name: String,
    /// What the framework covers.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Section identifiers that must be present and non-empty.
    pub required_sections: Vec<String>,
    /// Alignment keywords, matched case-insensitively. No duplicates.
    pub keywords: Vec<String>,
    /// Coverage ratio below which a warning is raised.
    pub min_keyword_coverage: f64,
    /// Score needed for a compliant verdict.
    pub compliance_threshold: f64,
}

impl ComplianceFramework {
    /// Create a framework with no requirements and default thresholds.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            required_sections: Vec::new(),
            keywords: Vec::new(),
            min_keyword_coverage: DEFAULT_MIN_KEYWORD_COVERAGE,
            compliance_threshold: DEFAULT_COMPLIANCE_THRESHOLD,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Set the required sections.
    pub fn with_sections(mut self, sections: Vec<&str>) -> Self {
        self.required_sections = sections.into_iter().map(String::from).collect();
        self
    }

    /// Set the keywords. Case-insensitive duplicates are dropped, first kept.
    pub fn with_keywords(mut self, keywords: Vec<&str>) -> Self {
        self.keywords = dedupe_keywords(keywords.into_iter().map(String::from));
        self
    }

    /// Set the minimum keyword coverage.
    pub fn with_min_keyword_coverage(mut self, coverage: f64) -> Self {
        self.min_keyword_coverage = coverage;
        self
    }

    /// Set the compliance threshold.
    pub fn with_compliance_threshold(mut self, threshold: f64) -> Self {
        self.compliance_threshold = threshold;
        self
    }

    fn with_defaults(mut self, defaults: &FrameworkDefaults) -> Self {
        self.min_keyword_coverage = defaults.min_keyword_coverage;
        self.compliance_threshold = defaults.compliance_threshold;
        self
    }

    /// Check name and thresholds.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(RubricError::invalid_framework(
                "<unnamed>",
                "framework name is empty",
            ));
        }
        check_unit_interval(&self.name, "compliance_threshold", self.compliance_threshold)?;
        check_unit_interval(&self.name, "min_keyword_coverage", self.min_keyword_coverage)?;
        if let Some(blank) = self.required_sections.iter().position(|s| s.trim().is_empty()) {
            return Err(RubricError::invalid_framework(
                &self.name,
                format!("required section at position {} is empty", blank),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        if let Some(repeat) = self.required_sections.iter().find(|s| !seen.insert(s.as_str())) {
            return Err(RubricError::invalid_framework(
                &self.name,
                format!("required section '{}' is listed more than once", repeat),
            ));
        }
        if let Some(blank) = self.keywords.iter().position(|k| k.trim().is_empty()) {
            return Err(RubricError::invalid_framework(
                &self.name,
                format!("keyword at position {} is empty", blank),
            ));
        }
        Ok(())
    }
}

fn check_unit_interval(framework: &str, field: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(RubricError::invalid_framework(
            framework,
            format!("{} must be within [0, 1], got {}", field, value),
        ));
    }
    Ok(())
}

fn dedupe_keywords(keywords: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    keywords
        .filter(|k| seen.insert(k.to_lowercase()))
        .collect()
}

/// A framework as written in configuration.
///
/// `required_sections` and `keywords` are mandatory; an empty list is fine,
/// an absent one is a configuration error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameworkDefinition {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required_sections: Option<Vec<String>>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub min_keyword_coverage: Option<f64>,
    #[serde(default)]
    pub compliance_threshold: Option<f64>,
}

impl FrameworkDefinition {
    /// Resolve into a framework, filling unset thresholds from `defaults`.
    pub fn into_framework(self, defaults: &FrameworkDefaults) -> Result<ComplianceFramework> {
        let name = self.name;
        let required_sections = self.required_sections.ok_or_else(|| {
            RubricError::invalid_framework(&name, "missing required_sections list")
        })?;
        let keywords = self
            .keywords
            .ok_or_else(|| RubricError::invalid_framework(&name, "missing keywords list"))?;

        let framework = ComplianceFramework {
            description: self.description.unwrap_or_default(),
            required_sections,
            keywords: dedupe_keywords(keywords.into_iter()),
            min_keyword_coverage: self
                .min_keyword_coverage
                .unwrap_or(defaults.min_keyword_coverage),
            compliance_threshold: self
                .compliance_threshold
                .unwrap_or(defaults.compliance_threshold),
            name,
        };
        framework.validate()?;
        Ok(framework)
    }
}

/// Immutable, ordered set of compliance frameworks keyed by name.
#[derive(Debug, Clone)]
pub struct FrameworkRegistry {
    frameworks: IndexMap<String, ComplianceFramework>,
}

impl FrameworkRegistry {
    /// Build a registry from frameworks, rejecting invalid or duplicate ones.
    pub fn new(frameworks: Vec<ComplianceFramework>) -> Result<Self> {
        let mut map = IndexMap::with_capacity(frameworks.len());
        for framework in frameworks {
            framework.validate()?;
            if map.contains_key(&framework.name) {
                return Err(RubricError::invalid_framework(
                    &framework.name,
                    "framework is defined more than once",
                ));
            }
            map.insert(framework.name.clone(), framework);
        }
        Ok(Self { frameworks: map })
    }

    /// Build a registry from configuration definitions.
    pub fn from_definitions(
        definitions: Vec<FrameworkDefinition>,
        defaults: &FrameworkDefaults,
    ) -> Result<Self> {
        let frameworks = definitions
            .into_iter()
            .map(|d| d.into_framework(defaults))
            .collect::<Result<Vec<_>>>()?;
        Self::new(frameworks)
    }

    /// Parse definitions from a JSON array and build a registry.
    pub fn from_json_str(json: &str, defaults: &FrameworkDefaults) -> Result<Self> {
        let definitions: Vec<FrameworkDefinition> = serde_json::from_str(json)?;
        Self::from_definitions(definitions, defaults)
    }

    /// The four built-in frameworks with default thresholds.
    pub fn builtin() -> Self {
        Self::builtin_with(&FrameworkDefaults::default())
    }

    /// The four built-in frameworks with the given thresholds.
    pub fn builtin_with(defaults: &FrameworkDefaults) -> Self {
        let frameworks = builtin_frameworks()
            .into_iter()
            .map(|f| f.with_defaults(defaults))
            .map(|f| (f.name.clone(), f))
            .collect();
        Self { frameworks }
    }

    /// Look up a framework.
    pub fn get(&self, name: &str) -> Result<&ComplianceFramework> {
        self.frameworks
            .get(name)
            .ok_or_else(|| RubricError::UnknownFramework {
                name: name.to_string(),
            })
    }

    /// Resolve every requested name, failing on the first unknown one.
    ///
    /// Repeated names select a framework once, at its first position.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<&ComplianceFramework>> {
        let mut selected: IndexMap<&str, &ComplianceFramework> = IndexMap::new();
        for name in names {
            let framework = self.get(name.as_ref())?;
            selected.entry(framework.name.as_str()).or_insert(framework);
        }
        Ok(selected.into_values().collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.frameworks.contains_key(name)
    }

    /// Framework names in registry order.
    pub fn names(&self) -> Vec<&str> {
        self.frameworks.keys().map(String::as_str).collect()
    }

    /// Frameworks in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &ComplianceFramework> {
        self.frameworks.values()
    }

    pub fn len(&self) -> usize {
        self.frameworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frameworks.is_empty()
    }
}

impl Default for FrameworkRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_frameworks() -> Vec<ComplianceFramework> {
    vec![
        ComplianceFramework::new("fda_guidelines")
            .with_description("FDA expectations for evidence-backed therapeutic policy")
            .with_sections(vec!["policy_statement", "rationale", "evidence_base", "references"])
            .with_keywords(vec!["fda approved", "clinical trial", "safety", "efficacy"]),
        ComplianceFramework::new("cms_requirements")
            .with_description("CMS coverage determination requirements")
            .with_sections(vec!["coverage_criteria", "evidence_summary", "implementation"])
            .with_keywords(vec!["medically necessary", "coverage", "reimbursement"]),
        ComplianceFramework::new("hipaa_compliance")
            .with_description("HIPAA privacy and security safeguards")
            .with_sections(vec!["privacy", "security", "patient_consent"])
            .with_keywords(vec![
                "hipaa",
                "privacy",
                "protected health information",
                "phi",
                "consent",
            ]),
        ComplianceFramework::new("clinical_standards")
            .with_description("Clinical practice and patient-safety standards")
            .with_sections(vec!["clinical_guidelines", "evidence_base", "monitoring"])
            .with_keywords(vec![
                "evidence-based",
                "clinical practice",
                "patient safety",
                "quality",
            ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry() {
        let registry = FrameworkRegistry::builtin();
        assert_eq!(registry.names(), BUILTIN_FRAMEWORKS.to_vec());

        let hipaa = registry.get("hipaa_compliance").unwrap();
        assert_eq!(hipaa.required_sections, vec!["privacy", "security", "patient_consent"]);
        assert_eq!(hipaa.compliance_threshold, DEFAULT_COMPLIANCE_THRESHOLD);
    }

    #[test]
    fn test_unknown_framework() {
        let registry = FrameworkRegistry::builtin();
        let err = registry.get("gdpr").unwrap_err();
        assert!(matches!(err, RubricError::UnknownFramework { ref name } if name == "gdpr"));

        let err = registry.resolve(&["fda_guidelines", "gdpr"]).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_keywords_deduplicated() {
        let framework =
            ComplianceFramework::new("x").with_keywords(vec!["Safety", "safety", "efficacy"]);
        assert_eq!(framework.keywords, vec!["Safety", "efficacy"]);
    }

    #[test]
    fn test_definition_missing_sections_list() {
        let json = r#"[{"name": "state_medicaid", "keywords": ["medicaid"]}]"#;
        let err = FrameworkRegistry::from_json_str(json, &FrameworkDefaults::default()).unwrap_err();

        match err {
            RubricError::InvalidFramework { framework, reason } => {
                assert_eq!(framework, "state_medicaid");
                assert!(reason.contains("required_sections"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_definition_missing_keywords() {
        let json = r#"[{"name": "state_medicaid", "required_sections": []}]"#;
        let err = FrameworkRegistry::from_json_str(json, &FrameworkDefaults::default()).unwrap_err();
        assert!(matches!(err, RubricError::InvalidFramework { ref reason, .. } if reason.contains("keywords")));
    }

    #[test]
    fn test_definition_uses_defaults() {
        let json = r#"[{
            "name": "state_medicaid",
            "required_sections": ["eligibility"],
            "keywords": ["medicaid"],
            "compliance_threshold": 0.8
        }]"#;
        let defaults = FrameworkDefaults {
            compliance_threshold: 0.7,
            min_keyword_coverage: 0.25,
        };
        let registry = FrameworkRegistry::from_json_str(json, &defaults).unwrap();
        let framework = registry.get("state_medicaid").unwrap();

        assert_eq!(framework.compliance_threshold, 0.8);
        assert_eq!(framework.min_keyword_coverage, 0.25);
    }

    #[test]
    fn test_repeated_names_resolve_once() {
        let registry = FrameworkRegistry::builtin();
        let selected = registry
            .resolve(&["hipaa_compliance", "fda_guidelines", "hipaa_compliance"])
            .unwrap();
        let names: Vec<&str> = selected.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["hipaa_compliance", "fda_guidelines"]);
    }

    #[test]
    fn test_repeated_required_section_rejected() {
        let json = r#"[{
            "name": "state_medicaid",
            "required_sections": ["eligibility", "references", "references"],
            "keywords": ["medicaid"]
        }]"#;
        let err = FrameworkRegistry::from_json_str(json, &FrameworkDefaults::default()).unwrap_err();

        match err {
            RubricError::InvalidFramework { framework, reason } => {
                assert_eq!(framework, "state_medicaid");
                assert!(reason.contains("'references'"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let built = FrameworkRegistry::new(vec![
            ComplianceFramework::new("x").with_sections(vec!["privacy", "privacy"]),
        ]);
        assert!(matches!(built, Err(RubricError::InvalidFramework { .. })));
    }

    #[test]
    fn test_duplicate_and_out_of_range_rejected() {
        let dup = FrameworkRegistry::new(vec![
            ComplianceFramework::new("a"),
            ComplianceFramework::new("a"),
        ]);
        assert!(dup.is_err());

        let bad = FrameworkRegistry::new(vec![
            ComplianceFramework::new("a").with_compliance_threshold(1.5),
        ]);
        assert!(matches!(bad, Err(RubricError::InvalidFramework { .. })));
    }
}
