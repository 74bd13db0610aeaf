/// High part of ln2; k * LN2_HI is exact for every k the reducer produces.
pub const LN2_HI: f64 = 6.93147180369123816490e-01;
/// ln2 - LN2_HI
pub const LN2_LO: f64 = 1.90821492927058770002e-10;
pub const LOG2_E: f64 = 1.44269504088896338700e+00;

/// `x = k*ln2 + (hi - lo)`, with `|hi - lo| <= ln2/2` up to rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReducedArgument {
    pub hi: f64,
    pub lo: f64,
    pub k: i32,
}

impl ReducedArgument {
    /// The reduced remainder `r = hi - lo`.
    #[inline(always)]
    pub fn r(&self) -> f64 {
        self.hi - self.lo
    }
}

/// Cody-Waite reduction of `x` against the split ln2.
///
/// Expects a finite `x` that passed the special-case filter; for those
/// `|k| <= 1075`.
#[inline(always)]
pub fn reduce(x: f64) -> ReducedArgument {
    // `as` truncates toward zero, so the 0.5 bias rounds half away from zero.
    let k = if x < 0.0 {
        (LOG2_E * x - 0.5) as i32
    } else if x > 0.0 {
        (LOG2_E * x + 0.5) as i32
    } else {
        0
    };
    let kf = k as f64;
    ReducedArgument {
        hi: x - kf * LN2_HI,
        lo: kf * LN2_LO,
        k,
    }
}
