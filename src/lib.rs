#![doc = include_str!("../README.md")]
use std::{
    ffi::OsString,
    io::Write,
    path::{Path, PathBuf},
};

mod amount;
mod error;
mod report;

pub use amount::{validate, Amount, Verdict};
pub use error::{Error, Result};
pub use report::Report;

/// Settings for a single run of the spending summary.
#[derive(Debug, Default)]
pub struct Options {
    pub input: PathBuf,
    /// Where to write the CSV report; ignored for a dry run.
    pub output: PathBuf,
    pub strict: bool,
    pub dry_run: bool,
}

/// Summarises the spending file named in `opts`.
///
/// Diagnostics for skipped lines, the dry-run summary, and the confirmation
/// that the report was written all go to `console`. Diagnostics collected
/// before a failed read are still printed. Nothing is written to
/// the report file unless every line was read successfully (or skipped, in
/// lenient mode) and there was at least one valid entry.
///
/// # Errors
///
/// Returns:
/// * [`Error::FileNotFound`] if the input file doesn't exist
/// * In strict mode, an [`Error::Line`] for the first invalid entry
/// * [`Error::NoValidData`] if there were no valid entries at all
/// * Any error from reading the input, or writing the report or console
pub fn run(opts: Options, console: &mut impl Write) -> Result<Report> {
    let mut report = Report::new();
    report.strict = opts.strict;
    let read = report.read_spending(&opts.input);
    for diag in report.diagnostics() {
        writeln!(console, "Skipping {diag}")?;
    }
    read?;
    if report.is_empty() {
        return Err(Error::NoValidData);
    }
    if opts.dry_run {
        write!(console, "{report}")?;
        writeln!(console, "Dry run completed")?;
    } else {
        report.write_csv_file(&opts.output)?;
        writeln!(console, "Wrote report: {}", opts.output.display())?;
    }
    Ok(report)
}

/// Returns the default report path for the input file `input`.
///
/// This is `input` with its final extension (if any) removed, and
/// `_report.csv` appended.
///
/// # Examples
///
/// ```
/// # use std::path::Path;
/// # use spend::default_output_path;
/// assert_eq!(
///     default_output_path("data/spend.txt"),
///     Path::new("data/spend_report.csv"),
/// );
/// assert_eq!(default_output_path("spend"), Path::new("spend_report.csv"));
/// ```
pub fn default_output_path(input: impl AsRef<Path>) -> PathBuf {
    let input = input.as_ref();
    let mut name = OsString::from(input.file_stem().unwrap_or_default());
    name.push("_report.csv");
    input.with_file_name(name)
}
