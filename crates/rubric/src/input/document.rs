//! Policy documents under validation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RubricError};

/// A drafted policy document.
///
/// `components` maps section identifiers to section text and is what
/// required-section detection looks at; `content` is the full text body that
/// keyword detection searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDocument {
    /// Informational label (e.g. `clinical_policy`). Does not affect rule selection.
    #[serde(default)]
    pub policy_type: String,

    /// Full text body.
    #[serde(default)]
    pub content: String,

    /// Section identifier to section text, in document order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<IndexMap<String, String>>,
}

impl PolicyDocument {
    /// Create a document with an empty components mapping.
    pub fn new(policy_type: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            policy_type: policy_type.into(),
            content: content.into(),
            components: Some(IndexMap::new()),
        }
    }

    /// Add a section.
    pub fn with_component(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.components
            .get_or_insert_with(IndexMap::new)
            .insert(id.into(), text.into());
        self
    }

    /// The components mapping, or an input error if the document has none.
    pub fn components(&self) -> Result<&IndexMap<String, String>> {
        self.components
            .as_ref()
            .ok_or_else(|| RubricError::missing_field("policy document", "components"))
    }

    /// Text of a section, if the document has it.
    pub fn section(&self, id: &str) -> Option<&str> {
        self.components
            .as_ref()
            .and_then(|c| c.get(id))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_components_is_an_input_error() {
        let doc: PolicyDocument =
            serde_json::from_str(r#"{"policy_type": "clinical_policy", "content": "text"}"#)
                .unwrap();

        let err = doc.components().unwrap_err();
        assert!(matches!(err, RubricError::MissingField { ref field, .. } if field == "components"));
    }

    #[test]
    fn test_components_preserve_order() {
        let json = r#"{
            "policy_type": "coverage_policy",
            "content": "",
            "components": {"rationale": "b", "policy_statement": "a"}
        }"#;
        let doc: PolicyDocument = serde_json::from_str(json).unwrap();
        let keys: Vec<&String> = doc.components().unwrap().keys().collect();

        assert_eq!(keys, vec!["rationale", "policy_statement"]);
        assert_eq!(doc.section("policy_statement"), Some("a"));
        assert_eq!(doc.section("references"), None);
    }
}
