//! Encode command implementation.

use super::{format_ids, read_input};
use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use cliptok::Tokenizer;

/// Encode command arguments.
#[derive(Parser)]
pub struct EncodeCommand {
    /// Text to encode, or `-` to read stdin
    pub input: String,

    /// Wrap the IDs in <|startoftext|> and <|endoftext|>
    #[arg(short, long, default_value_t = false)]
    pub special: bool,

    /// Encode each input line separately, one ID line per input line
    #[arg(short, long, default_value_t = false)]
    pub lines: bool,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<String>,
}

pub fn run(cmd: EncodeCommand, tokenizer: &Tokenizer) -> AnyhowResult<()> {
    let input_text = read_input(cmd.input)?;

    let encode = |text: &str| {
        if cmd.special {
            tokenizer.encode_with_special_tokens(text)
        } else {
            tokenizer.encode(text)
        }
    };

    let mut output = String::new();
    let mut total = 0;
    if cmd.lines {
        for line in input_text.lines() {
            let ids = encode(line)?;
            total += ids.len();
            output.push_str(&format_ids(&ids));
            output.push('\n');
        }
    } else {
        let ids = encode(&input_text)?;
        total = ids.len();
        output.push_str(&format_ids(&ids));
        output.push('\n');
    }

    match &cmd.output {
        Some(path) => {
            std::fs::write(path, &output).with_context(|| format!("failed to write {}", path))?;
            println!("Encoded {} tokens to {}", total, path);
        }
        None => {
            print!("{}", output);
        }
    }

    Ok(())
}
