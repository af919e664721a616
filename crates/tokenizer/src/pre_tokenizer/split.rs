//! Text splitting for pre-tokenization.
//!
//! Cleaned text is cut into pre-tokens with a single case-insensitive
//! pattern. Alternatives are tried in order at each position:
//!
//! 1. `<|startoftext|>` and `<|endoftext|>`, kept whole
//! 2. English contraction suffixes (`'s`, `'t`, `'re`, `'ve`, `'m`, `'ll`, `'d`)
//! 3. a run of letters
//! 4. a single digit
//! 5. a run of anything that is not whitespace, a letter, or a digit
//!
//! Whitespace between matches is dropped.

use cliptok_core::{Result, TokenizerError};
use regex::Regex;

/// Pre-token pattern used by CLIP.
pub const CLIP_PATTERN: &str = r"(?i)<\|startoftext\|>|<\|endoftext\|>|'s|'t|'re|'ve|'m|'ll|'d|\p{L}+|\p{N}|[^\s\p{L}\p{N}]+";

/// Text splitter for pre-tokenization.
#[derive(Debug, Clone)]
pub struct Splitter {
    regex: Regex,
}

impl Splitter {
    /// Create a splitter using [`CLIP_PATTERN`].
    pub fn new() -> Result<Self> {
        Self::with_pattern(CLIP_PATTERN)
    }

    /// Create a splitter from a custom pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            TokenizerError::InvalidConfig(format!("invalid split pattern: {}", e))
        })?;
        Ok(Self { regex })
    }

    /// Split text into pre-tokens, in order.
    ///
    /// The iterator borrows both the splitter and the text; calling `split`
    /// again restarts from the beginning.
    pub fn split<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.regex.find_iter(text).map(|m| m.as_str())
    }

    /// The pattern this splitter uses.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}
