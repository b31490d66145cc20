//! Compliance scoring against regulatory frameworks.
//!
//! A [`FrameworkRegistry`] holds named rule sets. The [`ComplianceScorer`]
//! checks a [`PolicyDocument`](crate::input::PolicyDocument) for required
//! sections and keywords, scores each framework, and rolls the results into a
//! [`ValidationResult`] with issues, warnings and recommendations.
//!
//! ```
//! use rubric::compliance::{ComplianceScorer, ComplianceStatus, FrameworkRegistry, ScoringConfig};
//! use rubric::input::PolicyDocument;
//!
//! let registry = FrameworkRegistry::builtin();
//! let config = ScoringConfig::default();
//! let doc = PolicyDocument::new("clinical_policy", "");
//!
//! let result = ComplianceScorer::new(&registry, &config).validate(&doc).unwrap();
//! assert_eq!(result.overall_status, ComplianceStatus::NonCompliant);
//! ```

mod alignment;
mod finding;
mod framework;
mod matcher;
mod recommendation;
mod scorer;

pub use alignment::{AlignmentReport, check_alignment};
pub use finding::{Finding, FindingKind, Severity};
pub use framework::{
    BUILTIN_FRAMEWORKS, ComplianceFramework, DEFAULT_COMPLIANCE_THRESHOLD,
    DEFAULT_MIN_KEYWORD_COVERAGE, FrameworkDefaults, FrameworkDefinition, FrameworkRegistry,
};
pub use matcher::{MatchOutcome, SectionMatcher};
pub use recommendation::{Recommendation, RecommendationEngine};
pub use scorer::{
    ComplianceScorer, ComplianceStatus, FrameworkResult, ScoringConfig, ValidationResult,
};
