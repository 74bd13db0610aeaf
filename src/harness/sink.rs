use std::io::Write;

use super::aggregate::{ErrorAccumulator, ErrorReport, aggregate};
use super::error::{HarnessError, Result};

/// One sweep input with the reference and every candidate's value,
/// the values in candidate order.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRow {
    pub x: f64,
    pub reference: f64,
    pub values: Vec<f64>,
}

impl SampleRow {
    /// `(name, value)` pairs for the given candidate names.
    pub fn named<'a, S: AsRef<str>>(
        &'a self,
        names: &'a [S],
    ) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        names.iter().map(|n| n.as_ref()).zip(self.values.iter().copied())
    }
}

/// Where a run stores its rows and how it reads back the aggregate.
pub trait ResultsSink {
    /// Called once before the first row; `names` fixes the row width.
    fn begin(&mut self, names: &[String]) -> Result<()>;

    fn submit(&mut self, row: SampleRow) -> Result<()>;

    /// Push buffered rows to storage.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn report(&self) -> Result<ErrorReport>;
}

fn check_width(names: &[String], row: &SampleRow) -> Result<()> {
    if row.values.len() != names.len() {
        return Err(HarnessError::Shape {
            expected: names.len(),
            got: row.values.len(),
        });
    }
    Ok(())
}

// ========= in-memory table =========

/// Keeps every row; reports with a parallel fold over all of them.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    names: Vec<String>,
    rows: Vec<SampleRow>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn rows(&self) -> &[SampleRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<SampleRow> {
        self.rows
    }
}

impl ResultsSink for MemorySink {
    fn begin(&mut self, names: &[String]) -> Result<()> {
        self.names = names.to_vec();
        self.rows.clear();
        Ok(())
    }

    fn submit(&mut self, row: SampleRow) -> Result<()> {
        check_width(&self.names, &row)?;
        self.rows.push(row);
        Ok(())
    }

    fn report(&self) -> Result<ErrorReport> {
        aggregate(&self.names, &self.rows)
    }
}

// ========= aggregate only =========

/// Folds rows into the running maxima and drops them.
#[derive(Debug, Clone, Default)]
pub struct SummarySink {
    names: Vec<String>,
    acc: ErrorAccumulator,
}

impl SummarySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> usize {
        self.acc.rows()
    }
}

impl ResultsSink for SummarySink {
    fn begin(&mut self, names: &[String]) -> Result<()> {
        self.names = names.to_vec();
        self.acc = ErrorAccumulator::new(names.len());
        Ok(())
    }

    fn submit(&mut self, row: SampleRow) -> Result<()> {
        self.acc.observe(&row)
    }

    fn report(&self) -> Result<ErrorReport> {
        self.acc.finish(&self.names)
    }
}

// ========= markdown table stream =========

/// Streams rows as a Markdown table with values as hex bit patterns and
/// keeps a [`SummarySink`] for the report.
#[derive(Debug)]
pub struct TableSink<W: Write> {
    out: W,
    summary: SummarySink,
}

impl<W: Write> TableSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            summary: SummarySink::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultsSink for TableSink<W> {
    fn begin(&mut self, names: &[String]) -> Result<()> {
        self.summary.begin(names)?;
        write!(self.out, "| x | exact |")?;
        for name in names {
            write!(self.out, " {name} |")?;
        }
        writeln!(self.out)?;
        write!(self.out, "| ---: | :--- |")?;
        for _ in names {
            write!(self.out, " :--- |")?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn submit(&mut self, row: SampleRow) -> Result<()> {
        check_width(&self.summary.names, &row)?;
        write!(
            self.out,
            "| {:.17e} | {:016x} |",
            row.x,
            row.reference.to_bits()
        )?;
        for value in &row.values {
            write!(self.out, " {:016x} |", value.to_bits())?;
        }
        writeln!(self.out)?;
        self.summary.submit(row)
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush().map_err(HarnessError::from)
    }

    fn report(&self) -> Result<ErrorReport> {
        self.summary.report()
    }
}
