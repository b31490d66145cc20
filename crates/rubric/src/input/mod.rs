//! Engine inputs: literature records and policy documents.

mod document;
mod loader;
mod record;

pub use document::PolicyDocument;
pub use loader::{load_document, load_records, read_json};
pub use record::LiteratureRecord;
