use std::fmt;
use std::str::FromStr;

use super::error::{HarnessError, Result};

#[cfg(feature = "mpfr")]
const MPFR_PREC: u32 = 256;

/// Trusted exp every candidate is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reference {
    /// `f64::exp` from the platform libm.
    #[default]
    Platform,
    /// 256-bit MPFR exp rounded once to f64.
    #[cfg(feature = "mpfr")]
    Mpfr,
}

impl Reference {
    pub fn name(self) -> &'static str {
        match self {
            Reference::Platform => "platform",
            #[cfg(feature = "mpfr")]
            Reference::Mpfr => "mpfr",
        }
    }

    #[inline]
    pub fn eval(self, x: f64) -> f64 {
        match self {
            Reference::Platform => x.exp(),
            #[cfg(feature = "mpfr")]
            Reference::Mpfr => mpfr_exp_f64(x),
        }
    }
}

#[cfg(feature = "mpfr")]
fn mpfr_exp_f64(x: f64) -> f64 {
    let mut v = rug::Float::with_val(MPFR_PREC, x);
    v.exp_mut();
    v.to_f64()
}

impl FromStr for Reference {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "platform" | "libm" | "std" => Ok(Reference::Platform),
            #[cfg(feature = "mpfr")]
            "mpfr" => Ok(Reference::Mpfr),
            _ => Err(HarnessError::UnknownReference(s.to_string())),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
