use std::borrow::Cow;

use super::coeffs::{CoefficientSet, FREEBSD};
use super::ldexp;
use super::reduce::{ReducedArgument, reduce};
use super::special::filter;

// ========= correction and reconstruction =========

/// Odd minimax correction `c = r - r^2 * P(r^2)` for the reduced remainder.
#[inline(always)]
pub fn correct(arg: &ReducedArgument, coeffs: &CoefficientSet) -> f64 {
    let r = arg.r();
    let t = r * r;
    r - t * coeffs.horner(t)
}

/// `1 - ((lo - r*c/(2-c)) - hi)` scaled by `2^k`.
#[inline(always)]
pub fn reconstruct(arg: &ReducedArgument, c: f64) -> f64 {
    let r = arg.r();
    let y = 1.0 - ((arg.lo - (r * c) / (2.0 - c)) - arg.hi);
    ldexp(y, arg.k)
}

// ========= exp(x) =========

/// exp(x) through the shared pipeline with the given coefficients.
#[inline(always)]
pub fn evaluate(coeffs: &CoefficientSet, x: f64) -> f64 {
    if let Some(y) = filter(x) {
        return y;
    }
    let arg = reduce(x);
    let c = correct(&arg, coeffs);
    reconstruct(&arg, c)
}

/// exp(x) with the FreeBSD coefficients.
#[inline(always)]
pub fn exp(x: f64) -> f64 {
    evaluate(&FREEBSD, x)
}

/// A named exp built from one coefficient set.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpVariant {
    name: Cow<'static, str>,
    coeffs: CoefficientSet,
}

impl ExpVariant {
    pub fn new(name: impl Into<Cow<'static, str>>, coeffs: CoefficientSet) -> Self {
        Self {
            name: name.into(),
            coeffs,
        }
    }

    pub const fn named(name: &'static str, coeffs: CoefficientSet) -> Self {
        Self {
            name: Cow::Borrowed(name),
            coeffs,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coefficients(&self) -> &CoefficientSet {
        &self.coeffs
    }

    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        evaluate(&self.coeffs, x)
    }
}
