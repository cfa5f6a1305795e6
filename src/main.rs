//! mstats CLI
//!
//! A helper tool to filter, merge and report hierarchical simulation
//! statistics dumped as YAML.

use anyhow::{bail, Result};
use clap::Parser;
use env_logger::Env;
use std::io::{self, Write};
use std::path::PathBuf;

use mstats::output::{write_csv, write_flattened, write_histograms, write_yaml};
use mstats::parser::{load_documents, load_weights};
use mstats::pipeline::{build_pipeline, PipelineConfig};
use mstats::tree::Document;
use mstats::utils::config::DEFAULT_FLATTEN_SEP;

/// Filter, merge and report simulation statistics dumps
#[derive(Parser, Debug)]
#[command(name = "mstats")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input YAML stats files
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Required tag pattern, repeatable (all must match a distinct tag)
    #[arg(short = 't', long = "tags")]
    tags: Vec<String>,

    /// Node selection path, repeatable: nodeA::nodeB::nodeC with regex
    /// per level (results are unioned)
    #[arg(short = 'n', long = "node")]
    node: Vec<String>,

    /// Sum all selected nodes of each document to a single total
    #[arg(long)]
    sum: bool,

    /// Merge all documents numerically under the given name
    #[arg(long, value_name = "NAME")]
    sum_all: Option<String>,

    /// Simpoint weight file ("<weight> <id>" per line)
    #[arg(long, value_name = "FILE")]
    sp_weights: Option<PathBuf>,

    /// Simpoint prefix used to filter runs and name the merged result
    #[arg(long, value_name = "PREFIX")]
    sp_pfx: Option<String>,

    /// Reject non-numeric values under a reduction instead of skipping them
    #[arg(long)]
    strict_numeric: bool,

    /// Print results in YAML format
    #[arg(long)]
    yaml_out: bool,

    /// Print results in flattened 'nodeX::nodeY : value' format
    #[arg(long)]
    flatten: bool,

    /// Separator for flattened output paths
    #[arg(long, default_value = DEFAULT_FLATTEN_SEP, value_name = "SEP")]
    flatten_sep: String,

    /// Print histograms of leaf collections
    #[arg(long)]
    hist: bool,

    /// Print a CSV table, one row per result document
    #[arg(long)]
    csv: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Fail fast on conflicting reduction modes, before reading any input.
    if cli.sum && cli.sp_weights.is_some() {
        bail!("--sum and --sp-weights are mutually exclusive");
    }

    let sp_weights = match &cli.sp_weights {
        Some(path) => Some(load_weights(path)?),
        None => None,
    };

    let config = PipelineConfig {
        tag_patterns: cli.tags.clone(),
        node_paths: cli.node.clone(),
        sum: cli.sum,
        sum_all: cli.sum_all.clone(),
        sp_weights,
        sp_prefix: cli.sp_pfx.clone(),
        strict_numeric: cli.strict_numeric,
    };
    let pipeline = build_pipeline(config)?;

    let mut docs = Vec::new();
    for file in &cli.files {
        docs.extend(load_documents(file)?);
    }

    let results = pipeline.run(docs)?;
    write_reports(&cli, &results)?;

    Ok(())
}

fn write_reports(cli: &Cli, results: &[Document]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.yaml_out {
        write_yaml(&mut out, results)?;
    }
    if cli.flatten {
        write_flattened(&mut out, results, &cli.flatten_sep)?;
    }
    if cli.hist {
        write_histograms(&mut out, results)?;
    }
    if cli.csv {
        write_csv(&mut out, results, &cli.flatten_sep)?;
    }

    out.flush()?;
    Ok(())
}
