//! Decode command implementation.

use super::read_input;
use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use cliptok::Tokenizer;

/// Decode command arguments.
#[derive(Parser)]
pub struct DecodeCommand {
    /// Token IDs separated by commas or whitespace, or `-` to read stdin
    pub tokens: String,
}

/// Parse IDs separated by commas and/or whitespace.
pub fn parse_ids(tokens: &str) -> AnyhowResult<Vec<u32>> {
    tokens
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .with_context(|| format!("invalid token ID {:?}", s))
        })
        .collect()
}

pub fn run(cmd: DecodeCommand, tokenizer: &Tokenizer) -> AnyhowResult<()> {
    let ids = parse_ids(&read_input(cmd.tokens)?)?;
    let text = tokenizer.decode(&ids)?;

    println!("{}", text);

    Ok(())
}
