//! CLI argument parsing using Clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// intent-bench - accuracy and latency harness for intent classification oracles
#[derive(Parser, Debug)]
#[command(name = "intent-bench")]
#[command(version, about, long_about = None)]
#[command(after_help = "Examples:
  intent-bench bench                                  Dual-call benchmark of the default CSVs
  intent-bench bench --input pre.csv --calls 5        Five-call consistency probe
  intent-bench probe --url http://localhost:8080/api/find-service
  intent-bench catalog --prompt                       Show catalog and system instruction
")]
pub struct Cli {
    /// Settings file (JSON); defaults to $INTENT_BENCH_CONFIG or ./intent-bench.json
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug-level logging on stderr (RUST_LOG overrides)
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a chat-completion model with repeated identical calls per sample
    Bench(BenchArgs),

    /// Send every intent to the classification service and write a result CSV
    Probe(ProbeArgs),

    /// Print the service catalog
    Catalog {
        /// Also print the system instruction sent to chat models
        #[arg(long)]
        prompt: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct BenchArgs {
    /// Sample file(s), `;`-delimited (service_id;service_name;intent); one batch per file
    #[arg(long = "input", short = 'i', action = clap::ArgAction::Append)]
    pub inputs: Vec<PathBuf>,

    /// Model ID (e.g., openai/gpt-4o-mini)
    #[arg(long)]
    pub model: Option<String>,

    /// API key (overrides OPENROUTER_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Chat Completions endpoint
    #[arg(long)]
    pub base_url: Option<String>,

    /// Identical calls per sample
    #[arg(long)]
    pub calls: Option<usize>,

    /// Per-call timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Evaluate at most N samples per file (0 = all)
    #[arg(long)]
    pub max: Option<usize>,
}

#[derive(Args, Debug, Default)]
pub struct ProbeArgs {
    /// Sample file, `;`-delimited
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Result CSV to create
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// find-service endpoint URL
    #[arg(long)]
    pub url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Send at most N samples (0 = all)
    #[arg(long)]
    pub max: Option<usize>,
}
