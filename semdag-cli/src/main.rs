//! CLI entrypoint for semdag.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use semdag_analysis::{Cancellation, RunOutcome, RunReport};
use semdag_core::config::{load_yaml_config, preset, presets};
use semdag_core::{AnalysisConfig, ConfigError};
use semdag_storage::EvidenceStore;

/// Mine a bounded causal DAG for an exposure/outcome pair from a
/// biomedical predication store.
#[derive(Debug, Parser)]
#[command(name = "semdag")]
#[command(about = "k-hop causal DAG miner over a biomedical predication store")]
#[command(after_help = preset_help())]
#[command(group(
    clap::ArgGroup::new("config_source")
        .required(true)
        .args(["config", "config_file"])
))]
struct Cli {
    /// Predefined exposure-outcome configuration to analyze.
    #[arg(long)]
    config: Option<String>,

    /// YAML analysis-configuration file.
    #[arg(long)]
    config_file: Option<PathBuf>,

    /// Path to the evidence database.
    #[arg(long)]
    db: PathBuf,

    /// Minimum supporting publications per relationship.
    /// Overrides the configuration file when given.
    #[arg(long)]
    threshold: Option<u32>,

    /// Maximum hop depth. Overrides the configuration file when given.
    #[arg(long)]
    degree: Option<u32>,

    /// Compute the Markov-blanket union and emit its DAG.
    #[arg(long)]
    markov_blanket: bool,

    /// Output directory for generated artifacts.
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Verbose logging (debug level).
    #[arg(short, long)]
    verbose: bool,
}

fn preset_help() -> String {
    let mut help = String::from("Available exposure-outcome configurations:\n");
    for p in presets() {
        help.push_str(&format!("  {}: {}\n", p.name, p.description));
    }
    help
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                // --help / --version.
                ExitCode::SUCCESS
            };
            let _ = err.print();
            return code;
        }
    };
    init_tracing(cli.verbose);

    match execute(&cli) {
        Ok(report) => match report.outcome {
            RunOutcome::Completed { .. } => {
                print_summary(&cli, &report);
                ExitCode::SUCCESS
            }
            RunOutcome::EvidenceAbsent => {
                eprintln!(
                    "No evidence found for this exposure/outcome pair at the configured \
                     threshold. See no_evidence.json in {}.",
                    cli.output_dir.display()
                );
                ExitCode::FAILURE
            }
        },
        Err(message) => {
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> Result<RunReport, String> {
    let config = build_config(cli).map_err(|e| e.to_string())?;
    config.validate().map_err(|e| e.to_string())?;

    tracing::info!(
        exposures = config.exposure_cuis.len(),
        outcomes = config.outcome_cuis.len(),
        degree = config.degree,
        threshold = config.threshold,
        markov_blanket = config.markov_blanket,
        "starting analysis"
    );

    let store = EvidenceStore::open(&cli.db).map_err(|e| e.to_string())?;
    semdag_analysis::run(&config, &store, &cli.output_dir, &Cancellation::new())
        .map_err(|e| e.to_string())
}

fn build_config(cli: &Cli) -> Result<AnalysisConfig, ConfigError> {
    let mut config = match (&cli.config_file, &cli.config) {
        (Some(path), _) => load_yaml_config(path)?,
        (None, Some(name)) => {
            let p = preset(name).ok_or_else(|| ConfigError::UnknownPreset {
                name: name.clone(),
            })?;
            p.to_config(
                cli.threshold.unwrap_or(50),
                cli.degree.unwrap_or(3),
                cli.markov_blanket,
            )
        }
        // clap's argument group guarantees one of the two is present.
        (None, None) => unreachable!("config source enforced by clap"),
    };

    // Explicit flags override whatever the file said.
    if let Some(threshold) = cli.threshold {
        config.threshold = threshold;
    }
    if let Some(degree) = cli.degree {
        config.degree = degree;
    }
    if cli.markov_blanket {
        config.markov_blanket = true;
    }
    Ok(config)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn print_summary(cli: &Cli, report: &RunReport) {
    if let RunOutcome::Completed {
        nodes,
        edges,
        assertions,
        mb_nodes,
    } = &report.outcome
    {
        println!("Analysis complete.");
        println!("  Nodes: {nodes}");
        println!("  Edges: {edges}");
        println!("  Assertions: {assertions}");
        if let Some(mb) = mb_nodes {
            println!("  Markov blanket nodes: {mb}");
        }
        println!("  Output directory: {}", cli.output_dir.display());
        println!("Generated files:");
        for artifact in &report.artifacts {
            if let Some(name) = artifact.file_name() {
                println!("  - {}", name.to_string_lossy());
            }
        }
        if let Some(total) = report
            .timings
            .iter()
            .find(|s| s.stage == "total_execution")
        {
            println!("Total execution time: {:.2}s", total.duration_secs);
        }
    }
}
