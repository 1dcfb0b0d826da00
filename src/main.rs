use std::{io, path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use spend::Options;

/// Generate a CSV spending report from a text file of categories and
/// amounts (one `category,amount` entry per line).
#[derive(Parser, Debug)]
#[command(name = "spend", version)]
struct Cli {
    /// Path to input text file
    #[arg(default_value = "spend.txt")]
    input_file: PathBuf,

    /// Fail on the first invalid entry instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Print the totals instead of writing a CSV report
    #[arg(long)]
    dry_run: bool,

    /// Path to output CSV file (default: <INPUT_FILE>_report.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();
    match try_main(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: Cli) -> Result<()> {
    let output = cli
        .output
        .unwrap_or_else(|| spend::default_output_path(&cli.input_file));
    let opts = Options {
        input: cli.input_file,
        output,
        strict: cli.strict,
        dry_run: cli.dry_run,
    };
    spend::run(opts, &mut io::stdout().lock())?;
    Ok(())
}
