//! Main tokenizer implementation.
//!
//! `Tokenizer` owns every table built from the merge resource plus the
//! merge cache, and turns text into token IDs and back:
//!
//! ```text
//! encode: clean -> split -> byte-map -> merge (cached) -> vocabulary lookup
//! decode: vocabulary lookup -> concatenate -> byte-unmap -> UTF-8 -> </w> to space
//! ```
//!
//! All tables are immutable after construction. The cache is behind a lock,
//! so a single tokenizer can be shared between threads.

use crate::io::MergeResource;
use crate::pre_tokenizer::{Normalizer, Splitter};
use crate::utils::MergeCache;
use cliptok_core::{
    bpe, ByteMapper, MergeRanks, Result, TokenizerError, VocabLoader, Vocabulary,
    DEFAULT_MERGE_COUNT, END_OF_WORD,
};
use rayon::prelude::*;
use std::path::Path;

const REPLACEMENT: &str = "\u{FFFD}";

/// Configuration for building a tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Merge rules read from the resource
    pub merge_count: usize,
    /// Initial capacity of the merge cache
    pub cache_capacity_hint: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            merge_count: DEFAULT_MERGE_COUNT,
            cache_capacity_hint: 1024,
        }
    }
}

/// Builder for creating a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of merge rules to read.
    ///
    /// # Arguments
    /// * `count` - Rules taken after the header; must be at least 1
    pub fn merge_count(mut self, count: usize) -> Self {
        self.config.merge_count = count;
        self
    }

    /// Set the initial merge cache capacity.
    ///
    /// # Arguments
    /// * `capacity` - Entries to reserve; the cache still grows past it
    pub fn cache_capacity_hint(mut self, capacity: usize) -> Self {
        self.config.cache_capacity_hint = capacity;
        self
    }

    /// Build from resource lines (header first).
    ///
    /// # Arguments
    /// * `lines` - The resource lines, header included
    ///
    /// # Returns
    /// The tokenizer, or [`TokenizerError::CorruptVocab`] for a malformed
    /// resource
    pub fn from_lines<S: AsRef<str>>(self, lines: &[S]) -> Result<Tokenizer> {
        Tokenizer::with_config(lines, self.config)
    }

    /// Build from plain resource text.
    ///
    /// # Arguments
    /// * `text` - Newline-delimited resource text
    pub fn from_text(self, text: &str) -> Result<Tokenizer> {
        self.from_lines(&MergeResource::lines_from_text(text))
    }

    /// Build from a gzip-compressed resource held in memory.
    ///
    /// # Arguments
    /// * `bytes` - The compressed resource
    ///
    /// # Returns
    /// The tokenizer, or [`TokenizerError::CorruptVocab`] if the stream or
    /// its contents are malformed
    pub fn from_gzip_bytes(self, bytes: &[u8]) -> Result<Tokenizer> {
        self.from_lines(&MergeResource::lines_from_gzip(bytes)?)
    }

    /// Build from a resource file, gzip-compressed or plain.
    ///
    /// # Arguments
    /// * `path` - The resource file
    ///
    /// # Returns
    /// The tokenizer, or [`TokenizerError::Io`] if the file cannot be read
    pub fn from_file(self, path: &Path) -> Result<Tokenizer> {
        self.from_lines(&MergeResource::read_lines(path)?)
    }
}

/// CLIP byte-level BPE tokenizer.
#[derive(Debug)]
pub struct Tokenizer {
    bytes: ByteMapper,
    vocab: Vocabulary,
    ranks: MergeRanks,
    normalizer: Normalizer,
    splitter: Splitter,
    cache: MergeCache,
    config: TokenizerConfig,
}

impl Tokenizer {
    /// Create a tokenizer from merge resource lines with the default
    /// configuration.
    ///
    /// Fails with [`TokenizerError::CorruptVocab`] if the resource is
    /// malformed.
    pub fn new<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        Self::with_config(lines, TokenizerConfig::default())
    }

    /// Create a tokenizer from merge resource lines.
    pub fn with_config<S: AsRef<str>>(lines: &[S], config: TokenizerConfig) -> Result<Self> {
        let bytes = ByteMapper::build();
        let loaded = VocabLoader::with_merge_count(config.merge_count)?.build(lines, &bytes)?;

        log::info!(
            "loaded CLIP tokenizer: {} merges, vocabulary size {}",
            loaded.ranks.len(),
            loaded.vocab.len()
        );

        Ok(Self {
            bytes,
            vocab: loaded.vocab,
            ranks: loaded.ranks,
            normalizer: Normalizer::new(),
            splitter: Splitter::new()?,
            cache: MergeCache::with_capacity(config.cache_capacity_hint),
            config,
        })
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Merge one byte-mapped pre-token into space-separated symbols.
    ///
    /// Results are cached for the life of the tokenizer. The special tokens
    /// come back unchanged.
    pub fn merge_token(&self, mapped: &str) -> String {
        self.cache.get_or_merge(mapped, |token| bpe(token, &self.ranks))
    }

    /// Encode text to token IDs.
    ///
    /// The text is cleaned first, so case and whitespace layout do not
    /// affect the result.
    pub fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let cleaned = self.normalizer.clean(text);
        let mut ids = Vec::with_capacity(cleaned.len() / 3 + 1);

        for piece in self.splitter.split(&cleaned) {
            let mapped = self.bytes.encode_bytes(piece.as_bytes());
            let merged = self.merge_token(&mapped);

            for symbol in merged.split(' ') {
                let id = self
                    .vocab
                    .get_id(symbol)
                    .ok_or_else(|| TokenizerError::UnknownSymbol(symbol.to_string()))?;
                ids.push(id);
            }
        }

        Ok(ids)
    }

    /// Encode text and wrap it in the start-of-text and end-of-text IDs.
    pub fn encode_with_special_tokens(&self, text: &str) -> Result<Vec<u32>> {
        let body = self.encode(text)?;

        let mut ids = Vec::with_capacity(body.len() + 2);
        ids.push(self.vocab.special.start_of_text);
        ids.extend(body);
        ids.push(self.vocab.special.end_of_text);
        Ok(ids)
    }

    /// Encode a batch of texts (parallelized).
    pub fn encode_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Result<Vec<Vec<u32>>> {
        texts
            .par_iter()
            .map(|text| self.encode(text.as_ref()))
            .collect()
    }

    /// Decode token IDs back to text.
    ///
    /// Every ID is checked before any text is produced; an ID outside the
    /// vocabulary fails with [`TokenizerError::UnknownId`]. Characters with
    /// no byte mapping and invalid UTF-8 become U+FFFD. Each end-of-word
    /// marker becomes a space.
    pub fn decode(&self, ids: &[u32]) -> Result<String> {
        let mut text = String::with_capacity(ids.len() * 4);
        for &id in ids {
            let token = self.vocab.get_token(id).ok_or(TokenizerError::UnknownId {
                id,
                vocab_size: self.vocab.len(),
            })?;
            text.push_str(token);
        }

        let mut raw = Vec::with_capacity(text.len());
        for ch in text.chars() {
            match self.bytes.decode_char(ch) {
                Some(byte) => raw.push(byte),
                None => raw.extend_from_slice(REPLACEMENT.as_bytes()),
            }
        }

        Ok(String::from_utf8_lossy(&raw).replace(END_OF_WORD, " "))
    }

    /// Decode a batch of ID sequences (parallelized).
    pub fn decode_batch(&self, batch: &[Vec<u32>]) -> Result<Vec<String>> {
        batch.par_iter().map(|ids| self.decode(ids)).collect()
    }

    /// Get the vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Get the ID of a vocabulary token.
    pub fn token_to_id(&self, token: &str) -> Option<u32> {
        self.vocab.get_id(token)
    }

    /// Get the vocabulary token for an ID.
    pub fn id_to_token(&self, id: u32) -> Option<&str> {
        self.vocab.get_token(id)
    }

    /// ID of `<|startoftext|>`.
    pub fn start_of_text_id(&self) -> u32 {
        self.vocab.special.start_of_text
    }

    /// ID of `<|endoftext|>`.
    pub fn end_of_text_id(&self) -> u32 {
        self.vocab.special.end_of_text
    }

    /// Number of entries in the merge cache, including the special tokens.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Get a reference to the vocabulary.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Get a reference to the merge ranks.
    pub fn merge_ranks(&self) -> &MergeRanks {
        &self.ranks
    }

    /// Get the configuration this tokenizer was built with.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }
}
