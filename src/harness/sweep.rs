use std::iter::FusedIterator;

use crate::fastlibm::NEAR_ZERO;

use super::error::{HarnessError, Result};

pub const DEFAULT_ANCHOR: f64 = 1.0;
pub const DEFAULT_FACTOR: f64 = 1.00001234;
pub const DEFAULT_CEILING: f64 = 0.8;

/// Geometric input sweep: an optional anchor sample, then
/// `seed * factor^n` for n = 1, 2, ... up to the first value at or past
/// `ceiling`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepConfig {
    pub anchor: Option<f64>,
    pub seed: f64,
    pub factor: f64,
    pub ceiling: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            anchor: Some(DEFAULT_ANCHOR),
            seed: NEAR_ZERO,
            factor: DEFAULT_FACTOR,
            ceiling: DEFAULT_CEILING,
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(anchor) = self.anchor.filter(|a| !a.is_finite()) {
            return Err(HarnessError::InvalidConfig(format!(
                "anchor must be finite, got {anchor}"
            )));
        }
        if !(self.seed.is_finite() && self.seed > 0.0) {
            return Err(HarnessError::InvalidConfig(format!(
                "seed must be finite and positive, got {}",
                self.seed
            )));
        }
        if !(self.factor.is_finite() && self.factor > 1.0) {
            return Err(HarnessError::InvalidConfig(format!(
                "factor must be finite and greater than 1, got {}",
                self.factor
            )));
        }
        if !(self.ceiling.is_finite() && self.ceiling > self.seed) {
            return Err(HarnessError::InvalidConfig(format!(
                "ceiling must be finite and above the seed {}, got {}",
                self.seed, self.ceiling
            )));
        }
        Ok(())
    }

    /// A fresh iterator over the configured inputs.
    pub fn sweep(&self) -> Result<Sweep> {
        self.validate()?;
        Ok(Sweep {
            config: *self,
            anchor: self.anchor,
            x: self.seed,
        })
    }
}

/// Lazy iterator produced by [`SweepConfig::sweep`].
#[derive(Debug, Clone)]
pub struct Sweep {
    config: SweepConfig,
    anchor: Option<f64>,
    x: f64,
}

impl Sweep {
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Rewind to the first input.
    pub fn restart(&mut self) {
        self.anchor = self.config.anchor;
        self.x = self.config.seed;
    }
}

impl Iterator for Sweep {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if let Some(anchor) = self.anchor.take() {
            return Some(anchor);
        }
        if self.x >= self.config.ceiling {
            return None;
        }
        self.x *= self.config.factor;
        Some(self.x)
    }
}

impl FusedIterator for Sweep {}
