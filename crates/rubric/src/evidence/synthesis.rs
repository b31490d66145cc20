//! Aggregating classified and scored records into an evidence synthesis.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::input::LiteratureRecord;

use super::relevance::{RelevanceScorer, Topic};
use super::text::split_sentences;
use super::tier::{EvidenceTier, QualityClassifier};

/// Configuration for evidence synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Maximum number of headline key findings.
    pub findings_cap: usize,
    /// Maximum findings extracted from one abstract.
    pub max_findings_per_record: usize,
    /// Key findings quoted in the summary sentence.
    pub summary_findings: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            findings_cap: 10,
            max_findings_per_record: 3,
            summary_findings: 3,
        }
    }
}

/// A literature record after classification and scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedEvidence {
    #[serde(flatten)]
    pub record: LiteratureRecord,
    /// Index of the record in the input batch.
    pub position: usize,
    pub tier: EvidenceTier,
    /// Topical relevance in [0, 1].
    pub relevance_score: f64,
    /// Abstract sentences mentioning the topic.
    pub findings: Vec<String>,
}

/// A headline finding with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyFinding {
    pub text: String,
    pub record_id: String,
    pub tier: EvidenceTier,
    pub relevance_score: f64,
}

/// Number of records per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl TierCounts {
    pub fn get(&self, tier: EvidenceTier) -> usize {
        match tier {
            EvidenceTier::High => self.high,
            EvidenceTier::Medium => self.medium,
            EvidenceTier::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// Processed evidence bucketed by tier, input order kept within each bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierBuckets {
    pub high: Vec<ProcessedEvidence>,
    pub medium: Vec<ProcessedEvidence>,
    pub low: Vec<ProcessedEvidence>,
}

impl TierBuckets {
    pub fn get(&self, tier: EvidenceTier) -> &[ProcessedEvidence] {
        match tier {
            EvidenceTier::High => &self.high,
            EvidenceTier::Medium => &self.medium,
            EvidenceTier::Low => &self.low,
        }
    }

    fn push(&mut self, evidence: ProcessedEvidence) {
        match evidence.tier {
            EvidenceTier::High => self.high.push(evidence),
            EvidenceTier::Medium => self.medium.push(evidence),
            EvidenceTier::Low => self.low.push(evidence),
        }
    }

    fn counts(&self) -> TierCounts {
        TierCounts {
            high: self.high.len(),
            medium: self.medium.len(),
            low: self.low.len(),
        }
    }
}

/// Tier-stratified summary of a batch of literature for one topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSynthesis {
    pub topic: String,
    pub total_count: usize,
    pub tier_counts: TierCounts,
    pub key_findings: Vec<KeyFinding>,
    pub evidence_by_tier: TierBuckets,
    pub summary: String,
}

impl EvidenceSynthesis {
    /// Evidence at or above `min_tier`, in input order.
    pub fn evidence_at_or_above(&self, min_tier: EvidenceTier) -> Vec<&ProcessedEvidence> {
        let mut selected: Vec<&ProcessedEvidence> = EvidenceTier::PRIORITY
            .iter()
            .filter(|&&tier| tier >= min_tier)
            .flat_map(|&tier| self.evidence_by_tier.get(tier))
            .collect();
        selected.sort_by_key(|e| e.position);
        selected
    }

    /// Share of records in the high tier (0 for an empty synthesis).
    pub fn high_tier_share(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        self.tier_counts.high as f64 / self.total_count as f64
    }
}

/// Turns a batch of literature records into an [`EvidenceSynthesis`].
#[derive(Debug, Clone, Default)]
pub struct EvidenceSynthesizer {
    classifier: QualityClassifier,
    config: SynthesisConfig,
}

impl EvidenceSynthesizer {
    /// Create a synthesizer with the built-in lexicon and default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a custom classifier and configuration.
    pub fn with_config(classifier: QualityClassifier, config: SynthesisConfig) -> Self {
        Self { classifier, config }
    }

    /// Synthesize evidence for `topic` from `records`.
    ///
    /// Every record must carry an id and a title; the first one that does not
    /// fails the whole call before any processing happens. Sparse records
    /// (no abstract, no keywords) are processed normally.
    pub fn synthesize(&self, records: &[LiteratureRecord], topic: &str) -> Result<EvidenceSynthesis> {
        for (position, record) in records.iter().enumerate() {
            record.validate(position)?;
        }
        warn_duplicate_ids(records);

        let topic = Topic::new(topic);
        if topic.is_empty() {
            debug!(topic = topic.text(), "topic has no words; all relevance scores will be 0");
        }

        let processed = self.process_all(records, &topic);

        let mut buckets = TierBuckets::default();
        for evidence in processed {
            buckets.push(evidence);
        }
        let tier_counts = buckets.counts();
        let key_findings = self.select_key_findings(&buckets);
        let summary = self.compose_summary(topic.text(), &tier_counts, &key_findings);

        info!(
            topic = topic.text(),
            total = records.len(),
            high = tier_counts.high,
            medium = tier_counts.medium,
            low = tier_counts.low,
            key_findings = key_findings.len(),
            "evidence synthesized"
        );

        Ok(EvidenceSynthesis {
            topic: topic.text().to_string(),
            total_count: records.len(),
            tier_counts,
            key_findings,
            evidence_by_tier: buckets,
            summary,
        })
    }

    /// Classify, score and extract findings for one record.
    pub fn process(&self, record: &LiteratureRecord, position: usize, topic: &Topic) -> ProcessedEvidence {
        ProcessedEvidence {
            record: record.clone(),
            position,
            tier: self.classifier.classify(record),
            relevance_score: RelevanceScorer::score(record, topic),
            findings: self.extract_findings(&record.abstract_text, topic),
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn process_all(&self, records: &[LiteratureRecord], topic: &Topic) -> Vec<ProcessedEvidence> {
        records
            .iter()
            .enumerate()
            .map(|(position, record)| self.process(record, position, topic))
            .collect()
    }

    // Indexed parallel collect keeps input order.
    #[cfg(feature = "parallel")]
    fn process_all(&self, records: &[LiteratureRecord], topic: &Topic) -> Vec<ProcessedEvidence> {
        use rayon::prelude::*;

        records
            .par_iter()
            .enumerate()
            .map(|(position, record)| self.process(record, position, topic))
            .collect()
    }

    /// First abstract sentences that mention the topic.
    fn extract_findings(&self, abstract_text: &str, topic: &Topic) -> Vec<String> {
        split_sentences(abstract_text)
            .into_iter()
            .filter(|sentence| topic.mentioned_in(sentence))
            .take(self.config.max_findings_per_record)
            .map(String::from)
            .collect()
    }

    /// Pool high and medium findings, order by relevance, dedupe and cap.
    fn select_key_findings(&self, buckets: &TierBuckets) -> Vec<KeyFinding> {
        let mut eligible: Vec<&ProcessedEvidence> =
            buckets.high.iter().chain(buckets.medium.iter()).collect();
        eligible.sort_by_key(|e| e.position);

        let mut pooled: Vec<KeyFinding> = eligible
            .into_iter()
            .flat_map(|e| {
                e.findings.iter().map(move |text| KeyFinding {
                    text: text.clone(),
                    record_id: e.record.id.clone(),
                    tier: e.tier,
                    relevance_score: e.relevance_score,
                })
            })
            .collect();

        // Stable: equal scores keep input order.
        pooled.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));

        let mut seen = HashSet::new();
        pooled.retain(|f| seen.insert(f.text.clone()));
        pooled.truncate(self.config.findings_cap);
        pooled
    }

    fn compose_summary(&self, topic: &str, counts: &TierCounts, findings: &[KeyFinding]) -> String {
        let total = counts.total();
        if total == 0 {
            return format!(
                "No literature records were found for '{}' (0 records analyzed).",
                topic
            );
        }

        let mut summary = format!(
            "Evidence synthesis for '{}' based on {} {}: {} high-quality, {} medium-quality, {} low-quality.",
            topic,
            total,
            if total == 1 { "record" } else { "records" },
            counts.high,
            counts.medium,
            counts.low
        );

        let quoted: Vec<String> = findings
            .iter()
            .take(self.config.summary_findings)
            .enumerate()
            .map(|(i, f)| format!("{}) {}", i + 1, f.text))
            .collect();

        if quoted.is_empty() {
            summary.push_str(" No key findings were extracted.");
        } else {
            summary.push_str(" Key findings: ");
            summary.push_str(&quoted.join("; "));
        }

        summary
    }
}

fn warn_duplicate_ids(records: &[LiteratureRecord]) {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.id.as_str()) {
            warn!(record_id = %record.id, "duplicate record id in batch");
        }
    }
}
