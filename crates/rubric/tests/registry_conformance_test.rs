//! Built-in Framework Conformance Tests
//!
//! These tests pin the built-in compliance frameworks to the rule tables
//! policy drafts have always been checked against, and check that
//! configured frameworks behave exactly like built-in ones.
//!
//! # Test Categories
//!
//! 1. Built-in framework contents
//! 2. Default thresholds
//! 3. Configured definitions
//! 4. Per-framework verdicts on minimal documents

use rubric::compliance::{
    BUILTIN_FRAMEWORKS, ComplianceScorer, DEFAULT_COMPLIANCE_THRESHOLD,
    DEFAULT_MIN_KEYWORD_COVERAGE, FrameworkDefaults, FrameworkDefinition, FrameworkRegistry,
    ScoringConfig,
};
use rubric::{PolicyDocument, RubricError};

// =============================================================================
// Reference Rule Tables
// =============================================================================

/// (framework, required sections, keywords)
const REFERENCE_TABLES: &[(&str, &[&str], &[&str])] = &[
    (
        "fda_guidelines",
        &["policy_statement", "rationale", "evidence_base", "references"],
        &["fda approved", "clinical trial", "safety", "efficacy"],
    ),
    (
        "cms_requirements",
        &["coverage_criteria", "evidence_summary", "implementation"],
        &["medically necessary", "coverage", "reimbursement"],
    ),
    (
        "hipaa_compliance",
        &["privacy", "security", "patient_consent"],
        &["hipaa", "privacy", "protected health information", "phi", "consent"],
    ),
    (
        "clinical_standards",
        &["clinical_guidelines", "evidence_base", "monitoring"],
        &["evidence-based", "clinical practice", "patient safety", "quality"],
    ),
];

// =============================================================================
// Built-in Contents
// =============================================================================

#[test]
fn test_builtin_order_matches_reference() {
    let registry = FrameworkRegistry::builtin();
    let reference: Vec<&str> = REFERENCE_TABLES.iter().map(|(name, _, _)| *name).collect();

    assert_eq!(registry.names(), reference);
    assert_eq!(BUILTIN_FRAMEWORKS.to_vec(), reference);
}

#[test]
fn test_builtin_contents_match_reference() {
    let registry = FrameworkRegistry::builtin();

    for (name, sections, keywords) in REFERENCE_TABLES {
        let framework = registry.get(name).unwrap();
        assert_eq!(&framework.required_sections, sections, "sections of {}", name);
        assert_eq!(&framework.keywords, keywords, "keywords of {}", name);
        assert!(!framework.description.is_empty(), "{} has no description", name);
    }
}

#[test]
fn test_builtin_default_thresholds() {
    for framework in FrameworkRegistry::builtin().iter() {
        assert_eq!(framework.compliance_threshold, DEFAULT_COMPLIANCE_THRESHOLD);
        assert_eq!(framework.min_keyword_coverage, DEFAULT_MIN_KEYWORD_COVERAGE);
    }
    assert_eq!(DEFAULT_COMPLIANCE_THRESHOLD, 0.75);
}

// =============================================================================
// Configured Definitions
// =============================================================================

#[test]
fn test_serialized_builtins_reload_identically() {
    let builtin = FrameworkRegistry::builtin();
    let frameworks: Vec<_> = builtin.iter().collect();
    let json = serde_json::to_string(&frameworks).unwrap();

    let reloaded = FrameworkRegistry::from_json_str(&json, &FrameworkDefaults::default()).unwrap();
    for (original, copy) in builtin.iter().zip(reloaded.iter()) {
        assert_eq!(original, copy);
    }
}

#[test]
fn test_definition_errors_name_framework_and_field() {
    let definitions = vec![FrameworkDefinition {
        name: "state_medicaid".to_string(),
        required_sections: Some(vec!["eligibility".to_string()]),
        ..FrameworkDefinition::default()
    }];

    let err = FrameworkRegistry::from_definitions(definitions, &FrameworkDefaults::default())
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("state_medicaid"));
    assert!(message.contains("keywords"));
}

#[test]
fn test_duplicate_definitions_rejected() {
    let json = r#"[
        {"name": "dup", "required_sections": [], "keywords": []},
        {"name": "dup", "required_sections": [], "keywords": []}
    ]"#;
    let err = FrameworkRegistry::from_json_str(json, &FrameworkDefaults::default()).unwrap_err();
    assert!(matches!(err, RubricError::InvalidFramework { ref framework, .. } if framework == "dup"));
}

// =============================================================================
// Per-framework Verdicts
// =============================================================================

#[test]
fn test_minimal_document_per_framework() {
    let registry = FrameworkRegistry::builtin();
    let config = ScoringConfig::default();
    let scorer = ComplianceScorer::new(&registry, &config);

    for (name, sections, keywords) in REFERENCE_TABLES {
        let mut document = PolicyDocument::new("conformance", keywords.join(" and "));
        for section in *sections {
            document = document.with_component(*section, "Covered.");
        }

        let result = scorer.validate_frameworks(&document, &[*name]).unwrap();
        let framework = result.framework(name).unwrap();
        assert!(framework.compliant, "{} should accept its own minimal document", name);
        assert_eq!(framework.score, 1.0);

        // Dropping the last section always flips the verdict
        let last = sections[sections.len() - 1];
        if let Some(components) = document.components.as_mut() {
            components.shift_remove(last);
        }
        let result = scorer.validate_frameworks(&document, &[*name]).unwrap();
        assert!(!result.framework(name).unwrap().compliant);
        assert_eq!(result.issues[0].subject, last);
    }
}
