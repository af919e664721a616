//! cliptok - CLIP byte-level BPE tokenizer
//!
//! This crate turns text into the token IDs used by CLIP text encoders and
//! back. It loads the CLIP merge resource (usually
//! `bpe_simple_vocab_16e6.txt.gz`) into a 49408-entry vocabulary and encodes
//! with the same cleaning, splitting, and merging rules as the reference
//! tokenizer.
//!
//! # Features
//!
//! - Builder for loading from a file, gzip bytes, text, or lines
//! - Text cleaning (mojibake repair, HTML entities, whitespace, case)
//! - Atomic `<|startoftext|>` / `<|endoftext|>` handling
//! - Thread-safe merge cache and parallel batch APIs
//! - Export of the loaded tables as `vocab.json` + `merges.txt`
//!
//! # Example
//!
//! ```rust
//! use cliptok::Tokenizer;
//!
//! let resource = "#version: 0.2\nc a\nca t</w>\n";
//! let tokenizer = Tokenizer::builder().merge_count(2).from_text(resource)?;
//!
//! let ids = tokenizer.encode("Cat")?;
//! assert_eq!(ids, vec![513]);
//! assert_eq!(tokenizer.decode(&ids)?, "cat ");
//! # Ok::<(), cliptok::TokenizerError>(())
//! ```

// Re-export core types
pub use cliptok_core::{
    ByteMapper, MergeRanks, Result, TokenizerError, Vocabulary, CLIP_VOCAB_SIZE,
    DEFAULT_MERGE_COUNT, END_OF_TEXT, START_OF_TEXT,
};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{Tokenizer, TokenizerBuilder, TokenizerConfig};

// Resource I/O
pub mod io;
pub use io::{MergeResource, ResourceFormat, VocabExporter};

// Pre-tokenization
pub mod pre_tokenizer;
pub use pre_tokenizer::{Normalizer, Splitter};

// Utilities
pub mod utils;
pub use utils::MergeCache;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
