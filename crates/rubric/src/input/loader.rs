//! Loading engine inputs from JSON files.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{Result, RubricError};

use super::{LiteratureRecord, PolicyDocument};

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| RubricError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Load a batch of literature records from a JSON array.
///
/// Records are not validated here; the synthesizer validates them so that
/// in-memory batches and file batches fail the same way.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<LiteratureRecord>> {
    read_json(path)
}

/// Load a policy document from a JSON object.
pub fn load_document(path: impl AsRef<Path>) -> Result<PolicyDocument> {
    read_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_records() {
        let file = create_test_file(
            r#"[
                {"id": "1", "title": "A randomized trial", "abstract": "Metformin helped."},
                {"id": "2", "title": "A cohort study"}
            ]"#,
        );

        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].abstract_text, "Metformin helped.");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_document("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, RubricError::Io { .. }));
    }

    #[test]
    fn test_load_malformed_json() {
        let file = create_test_file("{ not json");
        let err = load_document(file.path()).unwrap_err();
        assert!(matches!(err, RubricError::Json(_)));
    }
}
