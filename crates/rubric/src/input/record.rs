//! Literature records as delivered by the literature source.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RubricError};

/// One retrieved article.
///
/// Only `id` and `title` are guaranteed by the literature source; every other
/// field may be empty and the engine degrades gracefully when it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteratureRecord {
    /// Source identifier (e.g. a PubMed ID), unique within a batch.
    pub id: String,

    /// Article title.
    pub title: String,

    /// Abstract text. May be empty.
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,

    /// Author names in publication order.
    #[serde(default)]
    pub authors: Vec<String>,

    /// Publication date as reported by the source (`2023-05-01`, `2023-05`, `2023`).
    #[serde(default)]
    pub publication_date: String,

    /// Journal name.
    #[serde(default)]
    pub journal: String,

    /// Indexing keywords (e.g. MeSH terms).
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl LiteratureRecord {
    /// Create a record with only the mandatory fields set.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            abstract_text: String::new(),
            authors: Vec::new(),
            publication_date: String::new(),
            journal: String::new(),
            keywords: Vec::new(),
        }
    }

    /// Set the abstract.
    pub fn with_abstract(mut self, text: impl Into<String>) -> Self {
        self.abstract_text = text.into();
        self
    }

    /// Set the authors.
    pub fn with_authors(mut self, authors: Vec<&str>) -> Self {
        self.authors = authors.into_iter().map(String::from).collect();
        self
    }

    /// Set the publication date.
    pub fn with_publication_date(mut self, date: impl Into<String>) -> Self {
        self.publication_date = date.into();
        self
    }

    /// Set the journal.
    pub fn with_journal(mut self, journal: impl Into<String>) -> Self {
        self.journal = journal.into();
        self
    }

    /// Set the keywords.
    pub fn with_keywords(mut self, keywords: Vec<&str>) -> Self {
        self.keywords = keywords.into_iter().map(String::from).collect();
        self
    }

    /// Title and abstract joined, the text searched for study-design phrases.
    pub fn design_text(&self) -> String {
        format!("{} {}", self.title, self.abstract_text)
    }

    /// Check the fields the engine cannot work without.
    ///
    /// `position` is the zero-based index of the record in its batch and is
    /// only used to name the offending record in the error.
    pub fn validate(&self, position: usize) -> Result<()> {
        let entity = || {
            if self.id.trim().is_empty() {
                format!("literature record #{}", position)
            } else {
                format!("literature record '{}' (#{})", self.id, position)
            }
        };

        if self.id.trim().is_empty() {
            return Err(RubricError::missing_field(entity(), "id"));
        }
        if self.title.trim().is_empty() {
            return Err(RubricError::missing_field(entity(), "title"));
        }
        Ok(())
    }
}
