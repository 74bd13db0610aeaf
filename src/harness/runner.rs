use log::{debug, error, info};
use rayon::prelude::*;

use super::aggregate::ErrorReport;
use super::candidate::Candidate;
use super::error::Result;
use super::reference::Reference;
use super::sink::{ResultsSink, SampleRow};
use super::sweep::Sweep;

pub const DEFAULT_CHUNK: usize = 1 << 16;

/// Drives every candidate and the reference over a sweep.
#[derive(Debug, Clone)]
pub struct Harness {
    candidates: Vec<Candidate>,
    reference: Reference,
    chunk_size: usize,
}

impl Harness {
    pub fn new(candidates: Vec<Candidate>, reference: Reference) -> Self {
        Self {
            candidates,
            reference,
            chunk_size: DEFAULT_CHUNK,
        }
    }

    /// The built-in coefficient sets plus the platform exp, in table order.
    pub fn default_candidates() -> Vec<Candidate> {
        let mut candidates = Candidate::builtin_variants();
        candidates.insert(2, Candidate::platform());
        candidates
    }

    /// Inputs evaluated in parallel before their rows go to the sink.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn reference(&self) -> Reference {
        self.reference
    }

    pub fn names(&self) -> Vec<String> {
        self.candidates.iter().map(|c| c.name().to_string()).collect()
    }

    /// Evaluate the reference and every candidate at `x`.
    pub fn sample(&self, x: f64) -> SampleRow {
        SampleRow {
            x,
            reference: self.reference.eval(x),
            values: self.candidates.iter().map(|c| c.eval(x)).collect(),
        }
    }

    /// Run the sweep into `sink` and return its report.
    ///
    /// Rows reach the sink in sweep order. The first sink error ends the
    /// run; rows submitted before it stay in the sink.
    pub fn run<S: ResultsSink + ?Sized>(&self, sweep: Sweep, sink: &mut S) -> Result<ErrorReport> {
        let names = self.names();
        info!(
            "sweeping {} candidates against {} reference (seed={:e} factor={} ceiling={})",
            names.len(),
            self.reference,
            sweep.config().seed,
            sweep.config().factor,
            sweep.config().ceiling
        );
        sink.begin(&names)?;

        let mut inputs = sweep;
        let mut chunk = Vec::with_capacity(self.chunk_size);
        let mut submitted = 0usize;
        loop {
            chunk.clear();
            chunk.extend(inputs.by_ref().take(self.chunk_size));
            if chunk.is_empty() {
                break;
            }
            let rows: Vec<SampleRow> = chunk.par_iter().map(|&x| self.sample(x)).collect();
            for row in rows {
                sink.submit(row).inspect_err(|e| {
                    error!("sink rejected row {submitted}: {e}");
                })?;
                submitted += 1;
            }
            debug!("submitted {submitted} rows");
        }

        sink.flush()?;
        let report = sink.report()?;
        info!(
            "sweep finished: {submitted} rows, {} exclusions",
            report.total_excluded()
        );
        Ok(report)
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new(Self::default_candidates(), Reference::default())
    }
}
