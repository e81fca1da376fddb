#![warn(missing_docs)]
//! Tallybench CLI Library
//!
//! Aggregates the timing CSV files an external run harness leaves behind
//! into comparable tables: per-instance average runtime, variability, and
//! speedup relative to a baseline variant, per hardware.
//!
//! The run matrix comes from `tallybench.toml` (discovered by walking up
//! from the current directory) with CLI flags layered on top.

mod config;
mod formatting;
mod pipeline;

pub use config::{ComboConfig, InputConfig, OutputConfig, TallyConfig};
pub use formatting::format_human_output;
pub use pipeline::run_pipeline;

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use tallybench_report::{
    generate_json_report, summary_csv, ExportOptions, OutputFormat, Report,
};

/// Tallybench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "tallybench")]
#[command(
    author,
    version,
    about = "Aggregates solver timing runs into comparable tables"
)]
pub struct Cli {
    /// Optional subcommand; defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to tallybench.toml (discovered by walking up when omitted)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format: human, json, csv
    #[arg(long, default_value = "human")]
    pub format: String,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Results root override
    #[arg(long)]
    pub results: Option<PathBuf>,

    /// Repetition count override
    #[arg(long)]
    pub repetitions: Option<usize>,

    /// Field delimiter override for delimited output
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Render instance names LaTeX-safely in delimited output
    #[arg(long)]
    pub latex: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate all configured combinations (default)
    Run,
    /// List the configured (hardware, variant) combinations
    Combos,
    /// Write a commented default tallybench.toml to stdout
    Init,
}

/// Run the Tallybench CLI. Main entry point for the binary.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the Tallybench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("tallybench=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("tallybench=info")
            .init();
    }

    // Load configuration (CLI flags override)
    let mut config = match &cli.config {
        Some(path) => TallyConfig::load(path)?,
        None => TallyConfig::discover().unwrap_or_default(),
    };
    apply_overrides(&cli, &mut config);

    match cli.command {
        Some(Commands::Combos) => {
            list_combinations(&config)?;
        }
        Some(Commands::Init) => {
            print!("{}", TallyConfig::default_toml());
        }
        Some(Commands::Run) | None => {
            run_aggregation(&cli, &config)?;
        }
    }

    Ok(())
}

fn apply_overrides(cli: &Cli, config: &mut TallyConfig) {
    if let Some(results) = &cli.results {
        config.input.results_root = results.display().to_string();
    }
    if let Some(repetitions) = cli.repetitions {
        config.input.repetitions = repetitions;
    }
    if let Some(delimiter) = cli.delimiter {
        config.output.delimiter = delimiter.to_string();
    }
    if cli.latex {
        config.output.latex_instances = true;
    }
}

fn list_combinations(config: &TallyConfig) -> anyhow::Result<()> {
    let matrix = config.to_matrix()?;
    println!("Tallybench run matrix ({} repetitions):", matrix.repetitions);
    for hardware in matrix.hardware_labels() {
        println!("├── hardware: {}", hardware);
        for combo in matrix.combinations.iter().filter(|c| c.hardware == hardware) {
            let marker = if combo.baseline { " (baseline)" } else { "" };
            println!("│   ├── {}{} [{}]", combo.variant, marker, combo.file_name());
        }
    }
    println!("{} combinations.", matrix.combinations.len());
    Ok(())
}

fn run_aggregation(cli: &Cli, config: &TallyConfig) -> anyhow::Result<()> {
    let matrix = config.to_matrix()?;
    // CLI --format wins over the configured default when explicitly set;
    // clap's default is "human", so a non-human value is always explicit.
    let format_str = if cli.format != "human" {
        cli.format.clone()
    } else {
        config.output.format.clone()
    };
    let format: OutputFormat = format_str
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let report = run_pipeline(&matrix);

    let output = match format {
        OutputFormat::Json => generate_json_report(&report)?,
        OutputFormat::Csv => render_csv(&report, config)?,
        OutputFormat::Human => format_human_output(&report),
    };

    if let Some(path) = &cli.output {
        let mut file = std::fs::File::create(path)?;
        file.write_all(output.as_bytes())?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }

    if report.summary.failed > 0 {
        eprintln!(
            "\n{} combination(s) failed; see the run summary above",
            report.summary.failed
        );
        std::process::exit(1);
    }

    Ok(())
}

/// Render the per-hardware summary tables as one delimited document,
/// sections separated by a comment line.
fn render_csv(report: &Report, config: &TallyConfig) -> anyhow::Result<String> {
    let opts = ExportOptions {
        delimiter: config.delimiter_byte()?,
        latex_instances: config.output.latex_instances,
    };

    let mut sections = Vec::new();
    for hw in &report.hardware {
        if hw.summary.is_empty() {
            continue;
        }
        sections.push(format!(
            "# {}\n{}",
            hw.hardware,
            summary_csv(&hw.summary, &hw.variants, &opts)
        ));
    }
    Ok(sections.join("\n"))
}
