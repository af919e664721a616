//! cliptok CLI - Command-line interface for the CLIP tokenizer.
//!
//! This is the main entry point for the `cliptok` command-line tool.

mod commands;

use clap::{Parser, Subcommand};
use cliptok::io::DEFAULT_RESOURCE;
use cliptok::DEFAULT_MERGE_COUNT;
use commands::{BenchmarkCommand, DecodeCommand, EncodeCommand, ExportCommand, InfoCommand};
use env_logger::Env;
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cliptok")]
#[command(about = "CLIP byte-level BPE tokenizer", long_about = None)]
#[command(version)]
struct Cli {
    /// Merge resource (gzip or plain text)
    #[arg(long, global = true, env = "CLIPTOK_VOCAB", default_value = DEFAULT_RESOURCE)]
    vocab: PathBuf,

    /// Number of merge rules to read from the resource
    #[arg(long, global = true, default_value_t = DEFAULT_MERGE_COUNT)]
    merge_count: usize,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease log verbosity (-q error only)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode text to token IDs
    Encode(EncodeCommand),
    /// Decode token IDs back to text
    Decode(DecodeCommand),
    /// Show vocabulary details
    Info(InfoCommand),
    /// Write vocab.json and merges.txt to a directory
    Export(ExportCommand),
    /// Benchmark encoding performance
    Benchmark(BenchmarkCommand),
}

fn init_logging(verbose: u8, quiet: u8) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    let level = match (verbose, quiet) {
        (0, 0) => None,
        (_, 1) => Some(LevelFilter::Error),
        (_, q) if q > 1 => Some(LevelFilter::Off),
        (1, _) => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    };
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let tokenizer = commands::load_tokenizer(&cli.vocab, cli.merge_count)?;

    match cli.command {
        Commands::Encode(cmd) => commands::encode::run(cmd, &tokenizer)?,
        Commands::Decode(cmd) => commands::decode::run(cmd, &tokenizer)?,
        Commands::Info(cmd) => commands::info::run(cmd, &tokenizer)?,
        Commands::Export(cmd) => commands::export::run(cmd, &tokenizer)?,
        Commands::Benchmark(cmd) => commands::benchmark::run(cmd, &tokenizer)?,
    }

    Ok(())
}
