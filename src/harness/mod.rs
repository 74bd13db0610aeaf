//! Comparison harness: sweeps inputs through every candidate and the
//! reference, hands the rows to a results sink, and reduces them to the
//! maximum scaled relative error per candidate.

mod aggregate;
mod candidate;
mod error;
mod reference;
mod runner;
mod sink;
mod sweep;

pub use aggregate::{
    ERROR_SCALE, ErrorAccumulator, ErrorReport, VariantError, aggregate, scaled_relative_error,
};
pub use candidate::Candidate;
pub use error::{HarnessError, Result};
pub use reference::Reference;
pub use runner::{DEFAULT_CHUNK, Harness};
pub use sink::{MemorySink, ResultsSink, SampleRow, SummarySink, TableSink};
pub use sweep::{DEFAULT_ANCHOR, DEFAULT_CEILING, DEFAULT_FACTOR, Sweep, SweepConfig};
