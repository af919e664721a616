//! Info command implementation.

use anyhow::Result as AnyhowResult;
use clap::Parser;
use cliptok::{Tokenizer, END_OF_TEXT, START_OF_TEXT};

/// Info command arguments.
#[derive(Parser)]
pub struct InfoCommand {
    /// Also print the first N merge rules
    #[arg(short, long, default_value_t = 0)]
    pub merges: usize,
}

pub fn run(cmd: InfoCommand, tokenizer: &Tokenizer) -> AnyhowResult<()> {
    println!("Vocabulary size: {}", tokenizer.vocab_size());
    println!("Merge rules: {}", tokenizer.merge_ranks().len());
    println!("{}: {}", START_OF_TEXT, tokenizer.start_of_text_id());
    println!("{}: {}", END_OF_TEXT, tokenizer.end_of_text_id());

    if cmd.merges > 0 {
        println!();
        for (rank, (left, right)) in tokenizer.merge_ranks().iter().take(cmd.merges).enumerate() {
            println!("{:>6}  {} {}", rank, left, right);
        }
    }

    Ok(())
}
