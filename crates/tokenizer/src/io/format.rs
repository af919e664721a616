//! File formats for merge resources and exported tables.

use cliptok_core::Vocabulary;
use serde::ser::{Serialize, Serializer};

/// Magic bytes at the start of a gzip stream.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Header written as the first line of an exported `merges.txt`.
pub const MERGES_HEADER: &str = "#version: 0.2";

/// Default file name of the CLIP merge resource.
pub const DEFAULT_RESOURCE: &str = "bpe_simple_vocab_16e6.txt.gz";

/// Encoding of a merge resource on disk or in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceFormat {
    /// gzip-compressed text
    Gzip,
    /// Plain UTF-8 text
    Plain,
}

impl ResourceFormat {
    /// Detect the format from the leading bytes.
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(&GZIP_MAGIC) {
            Self::Gzip
        } else {
            Self::Plain
        }
    }
}

/// Token -> ID mapping as read back from `vocab.json`.
pub type HuggingFaceVocab = std::collections::HashMap<String, u32>;

/// `vocab.json` view of a vocabulary.
///
/// Serializes as a JSON object with keys in ID order.
pub struct VocabJson<'a>(pub &'a Vocabulary);

impl Serialize for VocabJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(id, token)| (token, id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(ResourceFormat::detect(&[0x1f, 0x8b, 0x08]), ResourceFormat::Gzip);
        assert_eq!(ResourceFormat::detect(b"#version: 0.2\n"), ResourceFormat::Plain);
        assert_eq!(ResourceFormat::detect(&[]), ResourceFormat::Plain);
        assert_eq!(ResourceFormat::detect(&[0x1f]), ResourceFormat::Plain);
    }

    #[test]
    fn test_vocab_json_keeps_id_order() {
        let mut vocab = Vocabulary::new();
        vocab.push_unique("b", Some(0)).unwrap();
        vocab.push_unique("a", Some(0)).unwrap();

        let json = serde_json::to_string(&VocabJson(&vocab)).unwrap();
        assert_eq!(json, r#"{"b":0,"a":1}"#);

        let parsed: HuggingFaceVocab = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.get("a"), Some(&1));
    }
}
