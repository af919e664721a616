//! PyO3 wrapper for the Tokenizer struct

use cliptok::io::DEFAULT_RESOURCE;
use cliptok::{Tokenizer, VocabExporter, DEFAULT_MERGE_COUNT};
use pyo3::prelude::*;
use std::path::{Path, PathBuf};

use crate::error::IntoPyErr;

/// Environment variable naming the merge resource when no path is given.
pub const VOCAB_ENV: &str = "CLIPTOK_VOCAB";

/// Pick the merge resource: the explicit path, then `CLIPTOK_VOCAB`, then
/// the default file name in the working directory.
pub fn resource_path(path: Option<&str>, env: Option<String>) -> PathBuf {
    match (path, env) {
        (Some(path), _) => PathBuf::from(path),
        (None, Some(env)) if !env.is_empty() => PathBuf::from(env),
        _ => PathBuf::from(DEFAULT_RESOURCE),
    }
}

/// Python wrapper for the CLIP tokenizer
#[pyclass(name = "CLIPTokenizer")]
pub struct PyTokenizer {
    inner: Tokenizer,
}

#[pymethods]
impl PyTokenizer {
    /// Load the merge resource at `path`
    #[new]
    #[pyo3(signature = (path=None, merge_count=DEFAULT_MERGE_COUNT))]
    fn new(path: Option<&str>, merge_count: usize) -> PyResult<Self> {
        let path = resource_path(path, std::env::var(VOCAB_ENV).ok());
        let inner = Tokenizer::builder()
            .merge_count(merge_count)
            .from_file(&path)
            .map_err(|e| e.into_py_err())?;
        Ok(PyTokenizer { inner })
    }

    /// Build from plain resource text
    #[staticmethod]
    #[pyo3(signature = (text, merge_count=DEFAULT_MERGE_COUNT))]
    fn from_text(text: &str, merge_count: usize) -> PyResult<Self> {
        let inner = Tokenizer::builder()
            .merge_count(merge_count)
            .from_text(text)
            .map_err(|e| e.into_py_err())?;
        Ok(PyTokenizer { inner })
    }

    /// Encode text to token IDs
    fn encode(&self, text: &str) -> PyResult<Vec<u32>> {
        self.inner.encode(text).map_err(|e| e.into_py_err())
    }

    /// Encode text wrapped in start/end-of-text IDs
    fn encode_with_special_tokens(&self, text: &str) -> PyResult<Vec<u32>> {
        self.inner
            .encode_with_special_tokens(text)
            .map_err(|e| e.into_py_err())
    }

    /// Encode a batch of texts in parallel, without holding the GIL
    fn encode_batch(&self, py: Python<'_>, texts: Vec<String>) -> PyResult<Vec<Vec<u32>>> {
        py.allow_threads(|| self.inner.encode_batch(&texts))
            .map_err(|e| e.into_py_err())
    }

    /// Decode token IDs back to text
    fn decode(&self, tokens: Vec<u32>) -> PyResult<String> {
        self.inner.decode(&tokens).map_err(|e| e.into_py_err())
    }

    /// Decode a batch of token lists
    fn decode_batch(&self, py: Python<'_>, token_lists: Vec<Vec<u32>>) -> PyResult<Vec<String>> {
        py.allow_threads(|| self.inner.decode_batch(&token_lists))
            .map_err(|e| e.into_py_err())
    }

    /// Get the vocabulary size
    fn vocab_size(&self) -> usize {
        self.inner.vocab_size()
    }

    fn token_to_id(&self, token: &str) -> Option<u32> {
        self.inner.token_to_id(token)
    }

    fn id_to_token(&self, id: u32) -> Option<String> {
        self.inner.id_to_token(id).map(String::from)
    }

    #[getter]
    fn start_of_text_id(&self) -> u32 {
        self.inner.start_of_text_id()
    }

    #[getter]
    fn end_of_text_id(&self) -> u32 {
        self.inner.end_of_text_id()
    }

    /// Write `vocab.json` and `merges.txt` into a directory
    fn save(&self, path: &str) -> PyResult<()> {
        VocabExporter::new(self.inner.vocab(), self.inner.merge_ranks())
            .save(Path::new(path))
            .map_err(|e| e.into_py_err())
    }

    fn __len__(&self) -> usize {
        self.inner.vocab_size()
    }

    /// Get a string representation
    fn __repr__(&self) -> String {
        format!(
            "CLIPTokenizer(vocab_size={}, merges={})",
            self.inner.vocab_size(),
            self.inner.merge_ranks().len()
        )
    }

    fn __str__(&self) -> String {
        self.__repr__()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_path_precedence() {
        let env = Some("/data/merges.txt.gz".to_string());
        assert_eq!(
            resource_path(Some("local.txt"), env.clone()),
            PathBuf::from("local.txt")
        );
        assert_eq!(resource_path(None, env), PathBuf::from("/data/merges.txt.gz"));
        assert_eq!(resource_path(None, None), PathBuf::from(DEFAULT_RESOURCE));
        assert_eq!(
            resource_path(None, Some(String::new())),
            PathBuf::from(DEFAULT_RESOURCE)
        );
    }
}
