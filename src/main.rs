//! intent-bench CLI entry point.

#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use intent_bench::catalog::Catalog;
use intent_bench::cli::{self, Commands};
use intent_bench::config::{self, BenchSettings, Config, ProbeSettings};
use intent_bench::http::client::Client;
use intent_bench::prompt::system_prompt;
use intent_bench::providers::{FindServiceClient, OpenAIProvider};
use intent_bench::report::ProbeWriter;
use intent_bench::runner::{self, BenchOptions};
use intent_bench::sample::{Sample, load_samples};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = main_impl() {
        print_error_with_hints(&err);
        std::process::exit(1);
    }
}

fn main_impl() -> Result<()> {
    let cli = cli::Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let catalog = Catalog::standard();

    match cli.command {
        Commands::Catalog { prompt } => print_catalog(&catalog, prompt),
        Commands::Bench(args) => {
            let config = Config::load(cli.config.as_deref())?;
            let settings = BenchSettings::resolve(&args, &config, config::env_lookup)?;
            bench(&settings, &catalog)
        }
        Commands::Probe(args) => {
            let config = Config::load(cli.config.as_deref())?;
            let settings = ProbeSettings::resolve(&args, &config)?;
            probe(&settings, &catalog)
        }
    }
}

fn print_error_with_hints(err: &anyhow::Error) {
    for cause in err.chain() {
        if let Some(bench_error) = cause.downcast_ref::<intent_bench::Error>() {
            eprint!(
                "{}",
                intent_bench::error_hints::format_error_with_hints(bench_error)
            );
            return;
        }
    }

    eprintln!("{err:#}");
}

fn print_catalog(catalog: &Catalog, with_prompt: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for service in catalog.all() {
        writeln!(out, "{:>2}: {}", service.id, service.name)?;
    }
    if with_prompt {
        writeln!(out)?;
        writeln!(out, "{}", system_prompt(catalog))?;
    }
    Ok(())
}

fn cap(mut samples: Vec<Sample>, max: Option<usize>) -> Vec<Sample> {
    if let Some(max) = max {
        samples.truncate(max);
    }
    samples
}

fn bench(settings: &BenchSettings, catalog: &Catalog) -> Result<()> {
    tracing::debug!(?settings, "Resolved bench settings");

    // Every file is validated before the first request is sent.
    let batches = settings
        .inputs
        .iter()
        .map(|path| {
            load_samples(path, catalog)
                .map(|samples| (path.display().to_string(), cap(samples, settings.max_samples)))
        })
        .collect::<intent_bench::Result<Vec<_>>>()?;

    let client = Client::new(settings.timeout)?;
    let oracle = OpenAIProvider::new(&settings.model, &settings.api_key, client)
        .with_base_url(&settings.base_url);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (label, samples) in batches {
        let options = BenchOptions {
            label,
            calls_per_sample: settings.calls_per_sample,
        };
        runner::run_benchmark(&oracle, catalog, &samples, &options, &mut out)?;
    }
    Ok(())
}

fn probe(settings: &ProbeSettings, catalog: &Catalog) -> Result<()> {
    tracing::debug!(?settings, "Resolved probe settings");

    let samples = cap(load_samples(&settings.input, catalog)?, settings.max_samples);

    if let Some(parent) = settings.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    let file = File::create(&settings.output)
        .with_context(|| format!("creating output file {}", settings.output.display()))?;
    let mut sink = ProbeWriter::new(BufWriter::new(file))?;

    let client = FindServiceClient::new(&settings.endpoint, Client::new(settings.timeout)?);
    let summary = runner::run_probe(&client, &samples, &mut sink)?;

    println!(
        "Rows written: {} ({} succeeded, {} failed)",
        summary.rows, summary.succeeded, summary.failed
    );
    println!("Output saved to: {}", settings.output.display());
    Ok(())
}
