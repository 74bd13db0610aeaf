//! Per-candidate maximum relative error over a sweep.
//!
//! Scaled error is `|value - reference| / |reference| * 1e16`, so one unit
//! is roughly half an ulp near 1. Rows whose reference is zero or not
//! finite carry no meaningful ratio; they are counted in `excluded`
//! instead of entering the max. A NaN candidate value against a usable
//! reference is an unbounded error and scores `f64::INFINITY`.

use rayon::prelude::*;

use super::error::{HarnessError, Result};
use super::sink::SampleRow;

pub const ERROR_SCALE: f64 = 1e16;

/// `|value - reference| / |reference| * 1e16`, or `None` when the
/// reference is zero or not finite.
#[inline]
pub fn scaled_relative_error(value: f64, reference: f64) -> Option<f64> {
    if reference == 0.0 || !reference.is_finite() {
        return None;
    }
    if value.is_nan() {
        return Some(f64::INFINITY);
    }
    Some((value - reference).abs() / reference.abs() * ERROR_SCALE)
}

/// Aggregated error of one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantError {
    pub name: String,
    /// NaN when no row was included.
    pub max_scaled_error: f64,
    /// Smallest input attaining the max; `None` if no row was included.
    pub argmax: Option<f64>,
    pub samples: usize,
    pub excluded: usize,
}

/// One [`VariantError`] per candidate, in candidate order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorReport {
    pub variants: Vec<VariantError>,
}

impl ErrorReport {
    pub fn get(&self, name: &str) -> Option<&VariantError> {
        self.variants.iter().find(|v| v.name == name)
    }

    pub fn max_error(&self, name: &str) -> Option<f64> {
        self.get(name).map(|v| v.max_scaled_error)
    }

    /// `(name, max scaled error)` pairs in candidate order.
    pub fn max_errors(&self) -> impl Iterator<Item = (&str, f64)> {
        self.variants
            .iter()
            .map(|v| (v.name.as_str(), v.max_scaled_error))
    }

    pub fn total_excluded(&self) -> usize {
        self.variants.iter().map(|v| v.excluded).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Stat {
    max: f64,
    argmax: Option<f64>,
    samples: usize,
    excluded: usize,
}

impl Stat {
    #[inline]
    fn observe(&mut self, x: f64, value: f64, reference: f64) {
        match scaled_relative_error(value, reference) {
            Some(err) => {
                self.samples += 1;
                self.offer(err, Some(x));
            }
            None => self.excluded += 1,
        }
    }

    #[inline]
    fn offer(&mut self, err: f64, at: Option<f64>) {
        if err > self.max {
            self.max = err;
            self.argmax = at;
        } else if err == self.max {
            self.argmax = match (self.argmax, at) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };
        }
    }

    fn merge(mut self, other: Stat) -> Stat {
        self.samples += other.samples;
        self.excluded += other.excluded;
        if other.argmax.is_some() {
            self.offer(other.max, other.argmax);
        }
        self
    }
}

/// Incremental max-error state; order of observation does not matter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorAccumulator {
    stats: Vec<Stat>,
}

impl ErrorAccumulator {
    pub fn new(width: usize) -> Self {
        Self {
            stats: vec![Stat::default(); width],
        }
    }

    pub fn width(&self) -> usize {
        self.stats.len()
    }

    pub fn rows(&self) -> usize {
        self.stats
            .first()
            .map(|s| s.samples + s.excluded)
            .unwrap_or(0)
    }

    pub fn observe(&mut self, row: &SampleRow) -> Result<()> {
        if row.values.len() != self.stats.len() {
            return Err(HarnessError::Shape {
                expected: self.stats.len(),
                got: row.values.len(),
            });
        }
        for (stat, &value) in self.stats.iter_mut().zip(&row.values) {
            stat.observe(row.x, value, row.reference);
        }
        Ok(())
    }

    pub fn merge(mut self, other: ErrorAccumulator) -> Result<Self> {
        if other.stats.len() != self.stats.len() {
            return Err(HarnessError::Shape {
                expected: self.stats.len(),
                got: other.stats.len(),
            });
        }
        for (a, b) in self.stats.iter_mut().zip(other.stats) {
            *a = a.merge(b);
        }
        Ok(self)
    }

    pub fn finish<S: AsRef<str>>(&self, names: &[S]) -> Result<ErrorReport> {
        if names.len() != self.stats.len() {
            return Err(HarnessError::Shape {
                expected: self.stats.len(),
                got: names.len(),
            });
        }
        let variants = names
            .iter()
            .zip(&self.stats)
            .map(|(name, s)| VariantError {
                name: name.as_ref().to_string(),
                max_scaled_error: if s.samples == 0 { f64::NAN } else { s.max },
                argmax: s.argmax,
                samples: s.samples,
                excluded: s.excluded,
            })
            .collect();
        Ok(ErrorReport { variants })
    }
}

/// Parallel fold of `rows` into a report, one entry per name.
pub fn aggregate<S: AsRef<str>>(names: &[S], rows: &[SampleRow]) -> Result<ErrorReport> {
    let width = names.len();
    let acc = rows
        .par_iter()
        .try_fold(
            || ErrorAccumulator::new(width),
            |mut acc, row| {
                acc.observe(row)?;
                Ok::<_, HarnessError>(acc)
            },
        )
        .try_reduce(|| ErrorAccumulator::new(width), |a, b| a.merge(b))?;
    acc.finish(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(x: f64, reference: f64, values: &[f64]) -> SampleRow {
        SampleRow {
            x,
            reference,
            values: values.to_vec(),
        }
    }

    #[test]
    fn test_scaled_relative_error() {
        assert_eq!(scaled_relative_error(2.0, 2.0), Some(0.0));
        assert_eq!(scaled_relative_error(3.0, 2.0), Some(0.5e16));
        assert_eq!(scaled_relative_error(-3.0, -2.0), Some(0.5e16));
        assert_eq!(scaled_relative_error(1.0, 0.0), None);
        assert_eq!(scaled_relative_error(1.0, f64::INFINITY), None);
        assert_eq!(scaled_relative_error(1.0, f64::NAN), None);
        assert_eq!(scaled_relative_error(f64::NAN, 1.0), Some(f64::INFINITY));
        assert_eq!(scaled_relative_error(f64::NAN, 0.0), None);
        assert_eq!(scaled_relative_error(f64::INFINITY, 1.0), Some(f64::INFINITY));
    }

    #[test]
    fn test_aggregate_takes_max_not_mean() {
        // a is perturbed on every row, b only on the first; the perturbed
        // values round to nearby doubles so the expected max is recomputed
        let rows = vec![
            row(0.1, 1.0, &[1.0 + 1e-16, 1.0 + 5e-16]),
            row(0.2, 2.0, &[2.0 * (1.0 - 3e-16), 2.0]),
            row(0.3, 4.0, &[4.0 * (1.0 + 2e-16), 4.0]),
        ];
        let report = aggregate(&["a", "b"], &rows).unwrap();
        let expect_a = rows
            .iter()
            .map(|r| (r.values[0] - r.reference).abs() / r.reference * 1e16)
            .fold(0.0, f64::max);
        let a = report.get("a").unwrap();
        assert_eq!(a.max_scaled_error, expect_a);
        assert_eq!(a.argmax, Some(0.2));
        assert_eq!(a.samples, 3);
        let b = report.get("b").unwrap();
        assert_eq!(b.max_scaled_error, (rows[0].values[1] - 1.0) * 1e16);
        assert_eq!(b.argmax, Some(0.1));
    }

    #[test]
    fn test_exclusions_are_counted() {
        let rows = vec![
            row(-800.0, 0.0, &[0.0]),
            row(1.0, f64::NAN, &[2.7]),
            row(2.0, 2.0, &[f64::NAN]),
            row(3.0, 4.0, &[5.0]),
        ];
        let report = aggregate(&["v"], &rows).unwrap();
        let v = &report.variants[0];
        assert_eq!(v.excluded, 2);
        assert_eq!(v.samples, 2);
        assert_eq!(v.max_scaled_error, f64::INFINITY);
        assert_eq!(v.argmax, Some(2.0));
        assert_eq!(report.total_excluded(), 2);
    }

    #[test]
    fn test_nan_candidate_never_scores_zero() {
        let rows: Vec<SampleRow> = (1..50)
            .map(|i| {
                let x = i as f64 * 0.01;
                row(x, x.exp(), &[f64::NAN, x.exp()])
            })
            .collect();
        let report = aggregate(&["broken", "exact"], &rows).unwrap();
        let broken = report.get("broken").unwrap();
        assert_eq!(broken.max_scaled_error, f64::INFINITY);
        assert_eq!(broken.excluded, 0);
        assert_eq!(broken.argmax, Some(0.01));
        assert_eq!(report.max_error("exact"), Some(0.0));
    }

    #[test]
    fn test_empty_and_all_excluded() {
        let report = aggregate(&["v"], &[]).unwrap();
        assert!(report.variants[0].max_scaled_error.is_nan());
        assert_eq!(report.variants[0].argmax, None);

        let report = aggregate(&["v"], &[row(1.0, 0.0, &[1.0]), row(2.0, f64::NAN, &[7.0])]).unwrap();
        assert!(report.variants[0].max_scaled_error.is_nan());
        assert_eq!(report.variants[0].argmax, None);
        assert_eq!(report.variants[0].excluded, 2);
    }

    #[test]
    fn test_ties_report_smallest_input() {
        let rows = vec![row(0.9, 1.0, &[1.5]), row(0.4, 1.0, &[0.5]), row(0.7, 2.0, &[1.0])];
        let report = aggregate(&["v"], &rows).unwrap();
        assert_eq!(report.variants[0].argmax, Some(0.4));
    }

    #[test]
    fn test_shape_mismatch() {
        let rows = vec![row(1.0, 1.0, &[1.0, 1.0])];
        assert!(matches!(
            aggregate(&["only"], &rows),
            Err(HarnessError::Shape {
                expected: 1,
                got: 2
            })
        ));
    }

    #[test]
    fn test_incremental_equals_parallel() {
        let rows: Vec<SampleRow> = (1..5000)
            .map(|i| {
                let x = i as f64 * 1e-3;
                let e = x.exp();
                row(x, e, &[e * (1.0 + ((i * 7919) % 13) as f64 * 1e-17), e])
            })
            .collect();
        let mut acc = ErrorAccumulator::new(2);
        for r in rows.iter().rev() {
            acc.observe(r).unwrap();
        }
        assert_eq!(acc.rows(), rows.len());
        let names = ["noisy", "exact"];
        assert_eq!(acc.finish(&names).unwrap(), aggregate(&names, &rows).unwrap());
    }

    #[test]
    fn test_merge_is_order_independent() {
        let rows = [row(0.5, 1.0, &[1.25]), row(0.25, 1.0, &[0.75]), row(0.1, 1.0, &[1.1])];
        let mut left = ErrorAccumulator::new(1);
        left.observe(&rows[0]).unwrap();
        let mut right = ErrorAccumulator::new(1);
        right.observe(&rows[1]).unwrap();
        right.observe(&rows[2]).unwrap();
        let ab = left.clone().merge(right.clone()).unwrap();
        let ba = right.merge(left).unwrap();
        assert_eq!(ab, ba);
        assert_eq!(ab.finish(&["v"]).unwrap().variants[0].argmax, Some(0.25));
    }

    use proptest::prelude::*;
    proptest! {
        #[test]
        fn ptest_aggregate_is_exact_max(
            cells in prop::collection::vec((0.5..2.0_f64, -8i32..8, 0u8..10), 1..400)
        ) {
            // coarse deltas make ties common; x is a permutation of 0..401
            let rows: Vec<SampleRow> = cells
                .iter()
                .enumerate()
                .map(|(i, &(reference, ulps, kind))| {
                    let x = ((i * 37) % 401) as f64;
                    let value = if kind == 0 { f64::NAN } else { reference * (1.0 + ulps as f64 * 1e-16) };
                    let reference = if kind == 1 { 0.0 } else { reference };
                    row(x, reference, &[value])
                })
                .collect();
            let included: Vec<(f64, f64)> = rows
                .iter()
                .filter_map(|r| scaled_relative_error(r.values[0], r.reference).map(|e| (r.x, e)))
                .collect();

            let report = aggregate(&["v"], &rows).unwrap();
            let v = &report.variants[0];
            prop_assert_eq!(v.samples, included.len());
            prop_assert_eq!(v.excluded, rows.len() - included.len());
            if included.is_empty() {
                prop_assert!(v.max_scaled_error.is_nan());
                prop_assert_eq!(v.argmax, None);
            } else {
                let max = included.iter().map(|&(_, e)| e).fold(0.0, f64::max);
                let at = included
                    .iter()
                    .filter(|&&(_, e)| e == max)
                    .map(|&(x, _)| x)
                    .fold(f64::INFINITY, f64::min);
                prop_assert_eq!(v.max_scaled_error, max);
                prop_assert_eq!(v.argmax, Some(at));
            }
        }
    }
}
