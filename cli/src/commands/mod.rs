//! CLI commands for the cliptok tokenizer.

pub mod benchmark;
pub mod decode;
pub mod encode;
pub mod export;
pub mod info;

pub use benchmark::BenchmarkCommand;
pub use decode::DecodeCommand;
pub use encode::EncodeCommand;
pub use export::ExportCommand;
pub use info::InfoCommand;

use anyhow::{Context, Result as AnyhowResult};
use cliptok::Tokenizer;
use std::io::Read;
use std::path::Path;

/// Load the tokenizer from a merge resource file.
pub fn load_tokenizer(path: &Path, merge_count: usize) -> AnyhowResult<Tokenizer> {
    Tokenizer::builder()
        .merge_count(merge_count)
        .from_file(path)
        .with_context(|| format!("failed to load merge resource {}", path.display()))
}

/// Read an argument, or all of stdin when it is `-`.
pub fn read_input(arg: String) -> AnyhowResult<String> {
    if arg != "-" {
        return Ok(arg);
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read stdin")?;
    Ok(buffer)
}

/// Format IDs as a space-separated line.
pub fn format_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
