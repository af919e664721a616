//! Vocabulary storage and lookup.
//!
//! Token ids are dense: the id of a token is its position in the
//! vocabulary. The forward map uses `AHashMap` for fast lookups and
//! `CompactString` so that the short symbols typical of BPE stay inline.

use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use compact_str::CompactString;

/// Start-of-text special token.
pub const START_OF_TEXT: &str = "<|startoftext|>";

/// End-of-text special token.
pub const END_OF_TEXT: &str = "<|endoftext|>";

/// Marker appended to the last symbol of every word.
pub const END_OF_WORD: &str = "</w>";

/// Forward mapping: token string -> ID
pub type Vocab = AHashMap<CompactString, u32>;

/// Vocabulary with forward and reverse mappings.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// Forward mapping: token string -> ID
    pub vocab: Vocab,
    /// Reverse mapping, indexed by ID
    pub tokens: Vec<CompactString>,
    /// Special token IDs (cached for fast access)
    pub special: SpecialTokens,
}

impl Vocabulary {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new vocabulary with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vocab: Vocab::with_capacity(capacity),
            tokens: Vec::with_capacity(capacity),
            special: SpecialTokens::default(),
        }
    }

    /// Append a token, assigning it the next ID.
    ///
    /// Fails if the token is already present: a repeated entry would shadow
    /// an ID and leave the vocabulary with fewer distinct tokens than IDs.
    /// `line` is the resource line the token came from, if any, for the error.
    pub fn push_unique(&mut self, token: &str, line: Option<usize>) -> Result<u32> {
        let token = CompactString::new(token);

        if let Some(&existing) = self.vocab.get(&token) {
            return Err(TokenizerError::corrupt(
                line,
                format!("token {:?} duplicates vocabulary entry {}", token, existing),
            ));
        }

        let id = self.tokens.len() as u32;
        self.vocab.insert(token.clone(), id);
        self.tokens.push(token);

        Ok(id)
    }

    /// Get the ID for a token string.
    #[inline]
    pub fn get_id(&self, token: &str) -> Option<u32> {
        self.vocab.get(token).copied()
    }

    /// Get the token string for an ID.
    #[inline]
    pub fn get_token(&self, id: u32) -> Option<&str> {
        self.tokens.get(id as usize).map(|s| s.as_str())
    }

    /// Get the size of the vocabulary.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over `(id, token)` in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(id, token)| (id as u32, token.as_str()))
    }
}

/// IDs of the two special tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecialTokens {
    /// `<|startoftext|>`
    pub start_of_text: u32,
    /// `<|endoftext|>`
    pub end_of_text: u32,
}

impl SpecialTokens {
    /// Check if an ID is a special token.
    #[inline]
    pub fn is_special(&self, id: u32) -> bool {
        id == self.start_of_text || id == self.end_of_text
    }
}

/// Whether `token` is one of the two special token strings.
#[inline]
pub fn is_special_token(token: &str) -> bool {
    token == START_OF_TEXT || token == END_OF_TEXT
}
