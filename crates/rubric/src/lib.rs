//! Rubric: evidence synthesis and compliance scoring for healthcare policy drafting.
//!
//! Two deterministic engines sit behind one facade:
//!
//! - **Evidence synthesis** classifies literature records into quality tiers
//!   from study-design phrases, scores their relevance to a topic, extracts
//!   key findings and composes a templated summary.
//! - **Compliance scoring** checks a structured policy document against
//!   regulatory frameworks (required sections and keywords) and produces
//!   per-framework scores, an overall status, issues, warnings and
//!   recommendations.
//!
//! Nothing here calls a model or the network; the same inputs always give the
//! same outputs.
//!
//! # Example
//!
//! ```no_run
//! use rubric::Rubric;
//! use rubric::input::{load_document, load_records};
//!
//! let rubric = Rubric::new();
//!
//! let records = load_records("records.json").unwrap();
//! let synthesis = rubric.synthesize(&records, "metformin").unwrap();
//! println!("{}", synthesis.summary);
//!
//! let policy = load_document("policy.json").unwrap();
//! let result = rubric.validate(&policy).unwrap();
//! println!("{} ({:.2})", result.overall_status.label(), result.overall_score);
//! ```

pub mod compliance;
pub mod error;
pub mod evidence;
pub mod input;

mod rubric;

pub use crate::rubric::{Rubric, RubricConfig};
pub use compliance::{ComplianceStatus, FrameworkRegistry, ValidationResult};
pub use error::{Result, RubricError};
pub use evidence::{EvidenceSynthesis, EvidenceTier};
pub use input::{LiteratureRecord, PolicyDocument};
