//! Error types for the CLIP tokenizer.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tokenizer library.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// The merge resource is malformed. Fatal for the tokenizer being built.
    ///
    /// `line` is the 1-based resource line, when the fault has one.
    #[error("Corrupt vocabulary{}: {reason}", at_line(.line))]
    CorruptVocab {
        line: Option<usize>,
        reason: String,
    },

    /// A post-merge symbol has no vocabulary id.
    #[error("Unknown symbol after merging: {0:?}")]
    UnknownSymbol(String),

    /// Decode was given an id outside the vocabulary.
    #[error("Unknown token ID {id} (vocabulary size is {vocab_size})")]
    UnknownId { id: u32, vocab_size: usize },

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TokenizerError {
    pub(crate) fn corrupt(line: Option<usize>, reason: impl Into<String>) -> Self {
        Self::CorruptVocab {
            line,
            reason: reason.into(),
        }
    }
}

fn at_line(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" at line {}", line),
        None => String::new(),
    }
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
