//! Core BPE tables.
//!
//! This module contains the vocabulary, the merge-rank table, and the
//! loader that builds both from a merge-priority list.

pub mod loader;
pub mod merges;
pub mod vocab;

pub use loader::{LoadedVocab, VocabLoader, CLIP_VOCAB_SIZE, DEFAULT_MERGE_COUNT, MERGE_LIST_BOUND};
pub use merges::{MergeMap, MergeRanks, Pair};
pub use vocab::{SpecialTokens, Vocab, Vocabulary, END_OF_TEXT, END_OF_WORD, START_OF_TEXT};
