//! Reading merge resources and exporting loaded tables.

pub mod format;
pub mod load;
pub mod save;

pub use format::{HuggingFaceVocab, ResourceFormat, DEFAULT_RESOURCE, MERGES_HEADER};
pub use load::MergeResource;
pub use save::VocabExporter;
