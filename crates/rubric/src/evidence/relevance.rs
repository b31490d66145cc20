//! Topical relevance of a record to a query topic.

use std::collections::HashSet;

use crate::input::LiteratureRecord;

use super::text::tokenize;

/// A query topic with its token set computed once per batch.
#[derive(Debug, Clone)]
pub struct Topic {
    text: String,
    tokens: HashSet<String>,
}

impl Topic {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let tokens = tokenize(&text);
        Self { text, tokens }
    }

    /// The topic as given.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lower-cased topic words.
    pub fn tokens(&self) -> &HashSet<String> {
        &self.tokens
    }

    /// True when the topic has no words at all.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether `text` shares at least one word with the topic.
    pub fn mentioned_in(&self, text: &str) -> bool {
        !self.tokens.is_empty() && tokenize(text).iter().any(|t| self.tokens.contains(t))
    }
}

/// Scores records by the share of topic words they contain.
pub struct RelevanceScorer;

impl RelevanceScorer {
    /// Fraction of topic tokens present in the record's title, abstract and
    /// keywords, in `[0, 1]`. A topic with no tokens scores 0.
    pub fn score(record: &LiteratureRecord, topic: &Topic) -> f64 {
        if topic.is_empty() {
            return 0.0;
        }

        let mut record_tokens = tokenize(&record.title);
        record_tokens.extend(tokenize(&record.abstract_text));
        for keyword in &record.keywords {
            record_tokens.extend(tokenize(keyword));
        }

        let shared = topic
            .tokens()
            .iter()
            .filter(|t| record_tokens.contains(*t))
            .count();

        (shared as f64 / topic.tokens().len() as f64).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_overlap_scores_one() {
        let topic = Topic::new("diabetes management");
        let record = LiteratureRecord::new("1", "Diabetes management diabetes management");
        assert_eq!(RelevanceScorer::score(&record, &topic), 1.0);
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        let topic = Topic::new("diabetes management");
        let record = LiteratureRecord::new("1", "Asthma in children")
            .with_abstract("Inhaled corticosteroids reduced exacerbations.");
        assert_eq!(RelevanceScorer::score(&record, &topic), 0.0);
    }

    #[test]
    fn test_partial_overlap_counts_keywords() {
        let topic = Topic::new("Type 2 diabetes, metformin");
        let record = LiteratureRecord::new("1", "Glycemic control")
            .with_keywords(vec!["Metformin", "Diabetes Mellitus"]);
        // topic tokens: type, 2, diabetes, metformin
        assert_eq!(RelevanceScorer::score(&record, &topic), 0.5);
    }

    #[test]
    fn test_empty_topic_scores_zero() {
        let topic = Topic::new("  ?! ");
        let record = LiteratureRecord::new("1", "Anything at all");
        assert!(topic.is_empty());
        assert_eq!(RelevanceScorer::score(&record, &topic), 0.0);
    }

    #[test]
    fn test_topic_mentioned_in() {
        let topic = Topic::new("insulin pumps");
        assert!(topic.mentioned_in("Pumps improved adherence."));
        assert!(!topic.mentioned_in("Diet alone was studied."));
        assert!(!Topic::new("").mentioned_in("anything"));
    }
}
