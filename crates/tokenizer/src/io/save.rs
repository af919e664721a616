//! Exporting the loaded tables.
//!
//! The vocabulary and merge ranks are written in the HuggingFace layout:
//!
//! - `vocab.json`: token -> ID, keys in ID order
//! - `merges.txt`: a `#version` header, then one `left right` rule per line
//!   in rank order
//!
//! `merges.txt` is itself a valid plain-text merge resource.

use super::format::{VocabJson, MERGES_HEADER};
use cliptok_core::{MergeRanks, Result, TokenizerError, Vocabulary};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a tokenizer's tables to a directory.
pub struct VocabExporter<'a> {
    vocab: &'a Vocabulary,
    ranks: &'a MergeRanks,
}

impl<'a> VocabExporter<'a> {
    /// Create a new exporter.
    pub fn new(vocab: &'a Vocabulary, ranks: &'a MergeRanks) -> Self {
        Self { vocab, ranks }
    }

    /// Write `vocab.json` and `merges.txt` into `dir`, creating it if needed.
    ///
    /// # Arguments
    /// * `dir` - The output directory; existing files are overwritten
    ///
    /// # Returns
    /// `Ok(())` once both files are flushed, or [`TokenizerError::Io`] naming
    /// the path that failed
    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir).map_err(|err| TokenizerError::Io {
            path: dir.to_path_buf(),
            err,
        })?;

        let vocab_path = dir.join("vocab.json");
        let mut writer = create(&vocab_path)?;
        serde_json::to_writer_pretty(&mut writer, &VocabJson(self.vocab))?;
        writer.flush().map_err(|err| TokenizerError::Io {
            path: vocab_path.clone(),
            err,
        })?;

        let merges_path = dir.join("merges.txt");
        let mut writer = create(&merges_path)?;
        self.write_merges(&mut writer)
            .and_then(|_| writer.flush())
            .map_err(|err| TokenizerError::Io {
                path: merges_path.clone(),
                err,
            })?;

        log::debug!(
            "exported {} tokens to {} and {} merges to {}",
            self.vocab.len(),
            vocab_path.display(),
            self.ranks.len(),
            merges_path.display()
        );

        Ok(())
    }

    /// Write the merge rules, header first, in rank order.
    pub fn write_merges<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}", MERGES_HEADER)?;
        for (left, right) in self.ranks.iter() {
            writeln!(out, "{} {}", left, right)?;
        }
        Ok(())
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|err| TokenizerError::Io {
            path: path.to_path_buf(),
            err,
        })
}
