use std::borrow::Cow;

use crate::fastlibm::{ExpVariant, NAMED_SETS};

/// Something the harness can compare against the reference.
#[derive(Debug, Clone)]
pub enum Candidate {
    /// A polynomial variant from the shared pipeline.
    Polynomial(ExpVariant),
    /// Any other exp implementation, e.g. the platform's own.
    Function {
        name: Cow<'static, str>,
        f: fn(f64) -> f64,
    },
}

impl Candidate {
    /// The platform exponential, reported as `asm`.
    pub fn platform() -> Self {
        Candidate::Function {
            name: Cow::Borrowed("asm"),
            f: f64::exp,
        }
    }

    pub fn function(name: impl Into<Cow<'static, str>>, f: fn(f64) -> f64) -> Self {
        Candidate::Function {
            name: name.into(),
            f,
        }
    }

    /// Every built-in coefficient set as a polynomial candidate.
    pub fn builtin_variants() -> Vec<Candidate> {
        NAMED_SETS
            .iter()
            .map(|&(name, coeffs)| Candidate::Polynomial(ExpVariant::named(name, coeffs)))
            .collect()
    }

    pub fn name(&self) -> &str {
        match self {
            Candidate::Polynomial(v) => v.name(),
            Candidate::Function { name, .. } => name.as_ref(),
        }
    }

    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Candidate::Polynomial(v) => v.eval(x),
            Candidate::Function { f, .. } => f(x),
        }
    }
}

impl From<ExpVariant> for Candidate {
    fn from(v: ExpVariant) -> Self {
        Candidate::Polynomial(v)
    }
}
