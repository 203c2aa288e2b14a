use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use table_cell_eval::{
    CleanSummary, CompareOptions, ComparisonReport, NormalizeMode, SchemaVariant, clean_file,
    compare_files,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "cell-eval",
    version,
    about = "Score table-extraction output against ground truth, cell by cell"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare a model-output document with its ground truth.
    Compare(CompareArgs),
    /// Clean escape artifacts and stray spacing out of a model-output document.
    Clean(CleanArgs),
}

#[derive(Debug, Args)]
struct CompareArgs {
    /// Ground-truth JSON document.
    ground_truth: PathBuf,

    /// Model-output JSON document.
    model_output: PathBuf,

    /// Document layout: serial or location.
    #[arg(long, default_value = "serial")]
    variant: String,

    /// Text normalization: canonical or strip-whitespace (defaults per variant).
    #[arg(long)]
    mode: Option<String>,

    /// Keep header levels that repeat a coarser level.
    #[arg(long)]
    no_dedup: bool,

    /// Leave recall out of the result.
    #[arg(long)]
    no_recall: bool,

    /// Print the aggregate score as JSON instead of the text report.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct CleanArgs {
    /// Input JSON document.
    input: PathBuf,

    /// Where to write the cleaned document.
    output: PathBuf,
}

fn parse_options(args: &CompareArgs) -> Result<CompareOptions> {
    let variant = SchemaVariant::from_str(&args.variant)
        .map_err(|error| anyhow!(error))
        .context("failed to parse --variant")?;
    let mut options = CompareOptions::for_variant(variant);

    if let Some(mode) = args.mode.as_deref() {
        options.mode = NormalizeMode::from_str(mode)
            .map_err(|error| anyhow!(error))
            .context("failed to parse --mode")?;
    }
    if args.no_dedup {
        options.dedup_headers = false;
    }
    if args.no_recall {
        options.report_recall = false;
    }

    Ok(options)
}

fn run_compare(args: &CompareArgs) -> Result<()> {
    let options = parse_options(args)?;
    let evaluation = compare_files(&args.ground_truth, &args.model_output, &options)
        .with_context(|| {
            format!(
                "failed to compare '{}' with '{}'",
                args.ground_truth.display(),
                args.model_output.display()
            )
        })?;

    if args.json {
        let json = serde_json::to_string_pretty(&evaluation.score)
            .context("failed to serialize score")?;
        println!("{json}");
        return Ok(());
    }

    println!("Compare files:");
    println!("Ground truth: {}", args.ground_truth.display());
    println!("Model output: {}", args.model_output.display());
    println!();
    print!("{}", ComparisonReport::new(&evaluation));
    Ok(())
}

fn run_clean(args: &CleanArgs) -> Result<()> {
    let report = clean_file(&args.input, &args.output)
        .with_context(|| format!("failed to clean '{}'", args.input.display()))?;

    print!(
        "{}",
        CleanSummary {
            input: &args.input,
            output: &args.output,
            report: &report,
        }
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "table_cell_eval=debug"
    } else {
        "table_cell_eval=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let outcome = match &cli.command {
        Commands::Compare(args) => run_compare(args),
        Commands::Clean(args) => run_clean(args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(1)
        }
    }
}
