//! Evidence tiers and the study-design classifier that assigns them.

use std::fmt;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RubricError};
use crate::input::LiteratureRecord;

/// Coarse quality bucket for one literature record.
///
/// Variants are declared low to high so the derived ordering gives
/// `High > Medium > Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceTier {
    /// Case reports, opinion, preliminary work.
    Low,
    /// Cohort and observational designs; also the fallback tier.
    Medium,
    /// Randomized, controlled, and pooled-analysis designs.
    High,
}

impl EvidenceTier {
    /// Tiers in the order the classifier tries them.
    pub const PRIORITY: [EvidenceTier; 3] =
        [EvidenceTier::High, EvidenceTier::Medium, EvidenceTier::Low];

    /// Wire name (`high`, `medium`, `low`).
    pub fn name(&self) -> &'static str {
        match self {
            EvidenceTier::High => "high",
            EvidenceTier::Medium => "medium",
            EvidenceTier::Low => "low",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            EvidenceTier::High => "High quality",
            EvidenceTier::Medium => "Medium quality",
            EvidenceTier::Low => "Low quality",
        }
    }

    /// Parse a tier name (case-insensitive).
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" | "h" => Some(EvidenceTier::High),
            "medium" | "med" | "m" => Some(EvidenceTier::Medium),
            "low" | "l" => Some(EvidenceTier::Low),
            _ => None,
        }
    }
}

impl fmt::Display for EvidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Study-design phrases per tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierLexicon {
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub low: Vec<String>,
}

impl TierLexicon {
    /// Phrases for one tier.
    pub fn phrases(&self, tier: EvidenceTier) -> &[String] {
        match tier {
            EvidenceTier::High => &self.high,
            EvidenceTier::Medium => &self.medium,
            EvidenceTier::Low => &self.low,
        }
    }
}

impl Default for TierLexicon {
    fn default() -> Self {
        let owned = |phrases: &[&str]| phrases.iter().map(|p| p.to_string()).collect();
        Self {
            high: owned(&[
                "randomized controlled trial",
                "randomised controlled trial",
                "randomized",
                "randomised",
                "controlled trial",
                "clinical trial",
                "rct",
                "systematic review",
                "meta-analysis",
                "meta analysis",
                "double-blind",
                "double blind",
            ]),
            medium: owned(&[
                "cohort",
                "observational",
                "retrospective",
                "prospective",
                "case-control",
                "case control",
                "cross-sectional",
                "longitudinal",
                "registry",
            ]),
            low: owned(&[
                "case report",
                "case series",
                "expert opinion",
                "opinion",
                "editorial",
                "commentary",
                "preliminary",
                "pilot study",
                "anecdotal",
            ]),
        }
    }
}

// Compiled once; cloning a Regex only bumps a reference count.
static DEFAULT_MATCHERS: Lazy<Vec<TierMatcher>> =
    Lazy::new(|| compile_lexicon(&TierLexicon::default()).unwrap());

#[derive(Debug, Clone)]
struct TierMatcher {
    tier: EvidenceTier,
    pattern: Option<Regex>,
}

fn compile_lexicon(lexicon: &TierLexicon) -> Result<Vec<TierMatcher>> {
    EvidenceTier::PRIORITY
        .iter()
        .map(|&tier| {
            let phrases = lexicon.phrases(tier);
            if let Some(blank) = phrases.iter().position(|p| p.trim().is_empty()) {
                return Err(RubricError::Config(format!(
                    "empty phrase at position {} in the {} tier lexicon",
                    blank, tier
                )));
            }

            let pattern = if phrases.is_empty() {
                None
            } else {
                let alternation = phrases
                    .iter()
                    .map(|p| regex::escape(p.trim()))
                    .collect::<Vec<_>>()
                    .join("|");
                Some(
                    RegexBuilder::new(&format!(r"\b(?:{})\b", alternation))
                        .case_insensitive(true)
                        .build()?,
                )
            };

            Ok(TierMatcher { tier, pattern })
        })
        .collect()
}

/// Assigns an [`EvidenceTier`] from study-design phrases in the title and abstract.
///
/// Tiers are tried in priority order (`high`, `medium`, `low`) and the first
/// tier with a phrase match wins. Text with no recognized phrase, including an
/// empty abstract, falls back to `medium`.
#[derive(Debug, Clone)]
pub struct QualityClassifier {
    matchers: Vec<TierMatcher>,
}

impl QualityClassifier {
    /// Tier assigned when no phrase matches.
    pub const FALLBACK_TIER: EvidenceTier = EvidenceTier::Medium;

    /// Create a classifier with the built-in lexicon.
    pub fn new() -> Self {
        Self {
            matchers: DEFAULT_MATCHERS.clone(),
        }
    }

    /// Create a classifier from a custom lexicon.
    pub fn with_lexicon(lexicon: &TierLexicon) -> Result<Self> {
        Ok(Self {
            matchers: compile_lexicon(lexicon)?,
        })
    }

    /// Classify one record.
    pub fn classify(&self, record: &LiteratureRecord) -> EvidenceTier {
        self.classify_text(&record.design_text())
    }

    /// Classify free text.
    pub fn classify_text(&self, text: &str) -> EvidenceTier {
        self.matchers
            .iter()
            .find(|m| m.pattern.as_ref().is_some_and(|p| p.is_match(text)))
            .map(|m| m.tier)
            .unwrap_or(Self::FALLBACK_TIER)
    }
}

impl Default for QualityClassifier {
    fn default() -> Self {
        Self::new()
    }
}
