//! Evidence synthesis: tiering, relevance scoring and aggregation of
//! literature records for one topic.
//!
//! # Example
//!
//! ```
//! use rubric::evidence::{EvidenceSynthesizer, EvidenceTier};
//! use rubric::input::LiteratureRecord;
//!
//! let records = vec![
//!     LiteratureRecord::new("1", "A randomized controlled trial of metformin")
//!         .with_abstract("Metformin reduced HbA1c at 24 weeks."),
//! ];
//!
//! let synthesis = EvidenceSynthesizer::new()
//!     .synthesize(&records, "metformin")
//!     .unwrap();
//!
//! assert_eq!(synthesis.tier_counts.get(EvidenceTier::High), 1);
//! assert_eq!(synthesis.key_findings.len(), 1);
//! ```

mod assessment;
mod relevance;
mod synthesis;
mod text;
mod tier;

pub use assessment::{AssessmentConfig, AssessmentStatus, EvidenceAssessment, EvidenceAssessor};
pub use relevance::{RelevanceScorer, Topic};
pub use synthesis::{
    EvidenceSynthesis, EvidenceSynthesizer, KeyFinding, ProcessedEvidence, SynthesisConfig,
    TierBuckets, TierCounts,
};
pub use text::{split_sentences, tokenize};
pub use tier::{EvidenceTier, QualityClassifier, TierLexicon};
