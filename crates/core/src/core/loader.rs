//! Building the vocabulary and merge ranks from a merge-priority list.
//!
//! The resource is newline-delimited text. The first line is a version
//! header and is skipped; the next `merge_count` lines are merge rules of
//! the form `left right`, earliest first. Anything after them is ignored.
//!
//! The vocabulary is laid out as:
//!
//! 1. the 256 byte symbols, in [`ByteMapper::byte_order`]
//! 2. the same 256 symbols with the end-of-word marker appended
//! 3. one entry per merge rule (`left + right`), in merge order
//! 4. `<|startoftext|>` and `<|endoftext|>`

use super::merges::MergeRanks;
use super::vocab::{SpecialTokens, Vocabulary, END_OF_TEXT, END_OF_WORD, START_OF_TEXT};
use crate::encoding::ByteMapper;
use crate::error::{Result, TokenizerError};

/// Number of byte symbols (and of end-of-word byte symbols).
pub const BYTE_SYMBOLS: usize = 256;

/// Bound the CLIP merge list is cut against.
pub const MERGE_LIST_BOUND: usize = 49152;

/// Merge rules read from the resource for the full CLIP vocabulary.
pub const DEFAULT_MERGE_COUNT: usize = MERGE_LIST_BOUND - BYTE_SYMBOLS - 2;

/// Vocabulary size implied by a merge count.
pub const fn vocab_size_for(merge_count: usize) -> usize {
    2 * BYTE_SYMBOLS + merge_count + 2
}

/// Size of the full CLIP vocabulary.
pub const CLIP_VOCAB_SIZE: usize = vocab_size_for(DEFAULT_MERGE_COUNT);

/// Tables produced by [`VocabLoader::build`].
#[derive(Debug, Clone)]
pub struct LoadedVocab {
    pub vocab: Vocabulary,
    pub ranks: MergeRanks,
}

/// Parses merge lines into the vocabulary and merge-rank table.
#[derive(Debug, Clone, Copy)]
pub struct VocabLoader {
    merge_count: usize,
}

impl VocabLoader {
    /// Loader for the full CLIP vocabulary.
    pub fn new() -> Self {
        Self {
            merge_count: DEFAULT_MERGE_COUNT,
        }
    }

    /// Loader reading `merge_count` merge rules.
    pub fn with_merge_count(merge_count: usize) -> Result<Self> {
        if merge_count == 0 {
            return Err(TokenizerError::InvalidConfig(
                "merge count must be at least 1".to_string(),
            ));
        }
        Ok(Self { merge_count })
    }

    /// Number of merge rules this loader reads.
    pub fn merge_count(&self) -> usize {
        self.merge_count
    }

    /// Build the vocabulary and merge ranks from the resource lines.
    ///
    /// Line numbers in errors are 1-based and count the header line.
    pub fn build<S: AsRef<str>>(&self, lines: &[S], bytes: &ByteMapper) -> Result<LoadedVocab> {
        if lines.is_empty() {
            return Err(TokenizerError::corrupt(Some(1), "missing header line"));
        }

        let available = lines.len() - 1;
        if available < self.merge_count {
            return Err(TokenizerError::corrupt(
                Some(lines.len()),
                format!(
                    "expected {} merge rules, found {}",
                    self.merge_count, available
                ),
            ));
        }

        let mut vocab = Vocabulary::with_capacity(vocab_size_for(self.merge_count));
        let mut ranks = MergeRanks::with_capacity(self.merge_count);

        let mut symbol = [0u8; 4];
        for ch in bytes.symbols() {
            vocab.push_unique(ch.encode_utf8(&mut symbol), None)?;
        }
        for ch in bytes.symbols() {
            let mut with_marker = String::with_capacity(ch.len_utf8() + END_OF_WORD.len());
            with_marker.push(ch);
            with_marker.push_str(END_OF_WORD);
            vocab.push_unique(&with_marker, None)?;
        }

        for (idx, line) in lines[1..=self.merge_count].iter().enumerate() {
            let line_no = idx + 2;
            let (left, right) = parse_merge(line.as_ref(), line_no)?;
            ranks.push(left, right);

            let mut merged = String::with_capacity(left.len() + right.len());
            merged.push_str(left);
            merged.push_str(right);
            vocab.push_unique(&merged, Some(line_no))?;
        }

        let start_of_text = vocab.push_unique(START_OF_TEXT, None)?;
        let end_of_text = vocab.push_unique(END_OF_TEXT, None)?;
        vocab.special = SpecialTokens {
            start_of_text,
            end_of_text,
        };

        log::debug!(
            "built vocabulary of {} tokens from {} merge rules ({} trailing lines ignored)",
            vocab.len(),
            ranks.len(),
            available - self.merge_count
        );

        Ok(LoadedVocab { vocab, ranks })
    }
}

impl Default for VocabLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a merge line into its two symbols.
fn parse_merge(line: &str, line_no: usize) -> Result<(&str, &str)> {
    let mut fields = line.split_whitespace();
    match (fields.next(), fields.next(), fields.next()) {
        (Some(left), Some(right), None) => Ok((left, right)),
        _ => Err(TokenizerError::corrupt(
            Some(line_no),
            format!(
                "expected 2 whitespace-separated fields, found {}",
                line.split_whitespace().count()
            ),
        )),
    }
}
