use serde::Serialize;
use tracing::{debug, info};

use std::{
    collections::HashMap,
    fmt::Display,
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::Path,
};

use crate::{
    amount::{validate, Amount, Verdict},
    error::{Error, Result},
};

/// Holds spending totals by category.
///
/// To create a new, empty `Report`, use [`Report::new`].
///
/// To aggregate spending entries, use [`Report::read_spending`] or
/// [`Report::read_lines`].
///
/// To get a printable summary of the report, use its [`Display`]
/// implementation. To write it out as CSV, use [`Report::write_csv`].
#[derive(Debug, Default)]
pub struct Report {
    /// Fail on the first invalid entry instead of skipping it.
    pub strict: bool,
    totals: Vec<(String, Amount)>,
    index: HashMap<String, usize>,
    diagnostics: Vec<Error>,
}

impl Report {
    /// Creates a new, empty report in lenient mode.
    #[must_use]
    pub fn new() -> Report {
        Self::default()
    }

    /// Reads spending entries from the file at `path`, and updates the report.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileNotFound`] if there is no file at `path`, or any
    /// error from [`Report::read_lines`].
    pub fn read_spending(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::FileNotFound(path.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        };
        info!("reading spending from {}", path.display());
        self.read_lines(BufReader::new(file))
    }

    /// Reads spending entries from `input`, one per line, in the format:
    ///
    /// ```txt
    /// CATEGORY,AMOUNT
    /// ```
    ///
    /// The category is trimmed and lowercased, so `Food ,5` and `food,5`
    /// count towards the same total. Only the first comma separates the
    /// fields. Blank lines are ignored.
    ///
    /// In lenient mode, a line that can't be used is skipped and the problem
    /// recorded in [`Report::diagnostics`]. In strict mode, the first such
    /// line ends the read with an error.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spend::Report;
    /// let mut report = Report::new();
    /// report.read_lines("food,10\nFOOD , 5\nbogus\n".as_bytes()).unwrap();
    /// assert_eq!(report.total("food").unwrap().value(), 15.0);
    /// assert_eq!(report.diagnostics().len(), 1);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns any error reading `input`, or, in strict mode, an
    /// [`Error::Line`] describing the first invalid entry.
    pub fn read_lines(&mut self, input: impl BufRead) -> Result<()> {
        for (i, line) in input.lines().enumerate() {
            let line = line?;
            let lineno = i + 1;
            if line.trim().is_empty() {
                continue;
            }
            if let Err(e) = self.read_entry(&line) {
                let e = e.at(lineno);
                if self.strict {
                    return Err(e);
                }
                debug!("skipping {e}");
                self.diagnostics.push(e);
            }
        }
        Ok(())
    }

    fn read_entry(&mut self, line: &str) -> Result<()> {
        let Some((category, amount)) = line.split_once(',') else {
            return Err(Error::MalformedLine);
        };
        let category = category.trim().to_lowercase();
        if category.is_empty() {
            return Err(Error::MissingCategory);
        }
        let amount = match validate(amount.trim(), self.strict)? {
            Verdict::Accepted(amount) => amount,
            Verdict::Rejected(e) => return Err(e),
        };
        debug!("{category}: +{amount}");
        self.add(category, amount);
        Ok(())
    }

    fn add(&mut self, category: String, amount: Amount) {
        let i = match self.index.get(&category) {
            Some(&i) => i,
            None => {
                self.index.insert(category.clone(), self.totals.len());
                self.totals.push((category, Amount::default()));
                self.totals.len() - 1
            }
        };
        self.totals[i].1 += amount;
    }

    /// Returns the total for each category, in the order each was first seen.
    pub fn totals(&self) -> impl Iterator<Item = (&str, Amount)> {
        self.totals.iter().map(|(name, total)| (name.as_str(), *total))
    }

    /// Returns the total for `category`, if it has any valid entries.
    #[must_use]
    pub fn total(&self, category: &str) -> Option<Amount> {
        self.index.get(category).map(|&i| self.totals[i].1)
    }

    /// Returns the sum of all category totals.
    ///
    /// This is worked out afresh from the category totals on every call.
    #[must_use]
    pub fn grand_total(&self) -> Amount {
        self.totals().map(|(_, total)| total).sum()
    }

    /// Returns the problems found with lines that were skipped.
    #[must_use]
    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Writes the report as CSV to `output`.
    ///
    /// The first row is the header `category,total`, followed by one row per
    /// category, and finally a `grand_total` row.
    ///
    /// # Errors
    ///
    /// Returns any errors from writing to `output`.
    pub fn write_csv(&self, output: impl Write) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(output);
        for (category, total) in self.totals() {
            wtr.serialize(Row { category, total })?;
        }
        wtr.serialize(Row {
            category: "grand_total",
            total: self.grand_total(),
        })?;
        wtr.flush()?;
        Ok(())
    }

    /// Writes the report as CSV to a new file at `path`, replacing any
    /// existing file.
    ///
    /// # Errors
    ///
    /// Returns any errors from creating or writing the file.
    pub fn write_csv_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(&path)?;
        self.write_csv(file)?;
        info!("wrote report to {}", path.as_ref().display());
        Ok(())
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Grand total of expenses: {}", self.grand_total())?;
        for (category, total) in self.totals() {
            writeln!(f, "{category}: {total}")?;
        }
        Ok(())
    }
}

/// Defines the CSV format for the report.
#[derive(Debug, Serialize)]
struct Row<'a> {
    category: &'a str,
    total: Amount,
}
