//! Export command implementation.

use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use cliptok::{Tokenizer, VocabExporter};
use std::path::PathBuf;

/// Export command arguments.
#[derive(Parser)]
pub struct ExportCommand {
    /// Directory to write vocab.json and merges.txt into
    pub dir: PathBuf,
}

pub fn run(cmd: ExportCommand, tokenizer: &Tokenizer) -> AnyhowResult<()> {
    VocabExporter::new(tokenizer.vocab(), tokenizer.merge_ranks())
        .save(&cmd.dir)
        .with_context(|| format!("failed to export to {}", cmd.dir.display()))?;

    println!(
        "Wrote {} tokens and {} merges to {}",
        tokenizer.vocab_size(),
        tokenizer.merge_ranks().len(),
        cmd.dir.display()
    );

    Ok(())
}
