//! Benchmark command implementation.

use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use cliptok::Tokenizer;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// Benchmark command arguments.
#[derive(Parser)]
pub struct BenchmarkCommand {
    /// Text file to encode, one document per line
    pub input: PathBuf,

    /// Number of iterations to run
    #[arg(short, long, default_value_t = 10)]
    pub iterations: usize,

    /// Encode lines in parallel
    #[arg(short, long, default_value_t = false)]
    pub parallel: bool,
}

pub fn run(cmd: BenchmarkCommand, tokenizer: &Tokenizer) -> AnyhowResult<()> {
    let text = fs::read_to_string(&cmd.input)
        .with_context(|| format!("failed to read {}", cmd.input.display()))?;
    let lines: Vec<&str> = text.lines().collect();
    let iterations = cmd.iterations.max(1);

    println!("Benchmarking encoding...");
    println!("  Lines: {}", lines.len());
    println!("  Text length: {} bytes", text.len());
    println!("  Iterations: {}", iterations);
    println!();

    let encode_all = || -> AnyhowResult<usize> {
        if cmd.parallel {
            let batch = tokenizer.encode_batch(&lines)?;
            Ok(batch.iter().map(Vec::len).sum())
        } else {
            let mut total = 0;
            for line in &lines {
                total += tokenizer.encode(line)?.len();
            }
            Ok(total)
        }
    };

    // Cold run fills the merge cache
    let cold_start = Instant::now();
    let tokens = encode_all()?;
    let cold = cold_start.elapsed();

    let start = Instant::now();
    for _ in 0..iterations {
        encode_all()?;
    }
    let elapsed = start.elapsed();
    let avg_secs = elapsed.as_secs_f64() / iterations as f64;

    println!("Results:");
    println!("  Tokens per pass: {}", tokens);
    println!("  Cold pass: {:.3}ms", cold.as_secs_f64() * 1000.0);
    println!("  Average warm pass: {:.3}ms", avg_secs * 1000.0);
    if avg_secs > 0.0 {
        println!("  Throughput: {:.0} tokens/s", tokens as f64 / avg_secs);
    }
    println!("  Cache entries: {}", tokenizer.cache_len());

    Ok(())
}
