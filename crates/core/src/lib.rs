//! cliptok-core - tables and merge algorithm for the CLIP BPE tokenizer
//!
//! This crate provides the data structures that are built once per
//! tokenizer and shared read-only afterwards, plus the pure merge loop:
//!
//! - [`ByteMapper`]: bijection between byte values and printable characters
//! - [`Vocabulary`]: dense token <-> ID tables with the two special tokens
//! - [`MergeRanks`]: merge priority of each symbol pair
//! - [`VocabLoader`]: builds the vocabulary and ranks from a merge list
//! - [`bpe`]: merges one byte-mapped pre-token into vocabulary symbols
//!
//! # Example
//!
//! ```rust
//! use cliptok_core::{bpe, ByteMapper, VocabLoader};
//!
//! let bytes = ByteMapper::build();
//! let lines = ["#version: 0.2", "c a", "ca t</w>"];
//! let loaded = VocabLoader::with_merge_count(2)?.build(&lines, &bytes)?;
//!
//! assert_eq!(bpe("cat", &loaded.ranks), "cat</w>");
//! assert_eq!(loaded.vocab.get_id("cat</w>"), Some(513));
//! # Ok::<(), cliptok_core::TokenizerError>(())
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

// Core BPE tables
pub mod core;
pub use core::{
    LoadedVocab, MergeMap, MergeRanks, Pair, SpecialTokens, Vocab, VocabLoader, Vocabulary,
    CLIP_VOCAB_SIZE, DEFAULT_MERGE_COUNT, END_OF_TEXT, END_OF_WORD, START_OF_TEXT,
};

// Byte mapping and merging
pub mod encoding;
pub use encoding::{bpe, merge_symbols, ByteMapper};
