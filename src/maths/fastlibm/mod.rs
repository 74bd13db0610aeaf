//! Range-reduced exp with a pluggable minimax correction.
//!
//! Every variant shares the same pipeline: special-case filter, Cody-Waite
//! reduction against split ln2 constants, an odd-power correction in
//! Horner form, and a rational reconstruction scaled by exponent
//! injection. Only the coefficient set differs between variants. No libm
//! calls are made on this path.

#![allow(clippy::excessive_precision)]
#![allow(clippy::unusual_byte_groupings)]

mod coeffs;
mod exp;
mod reduce;
mod special;

pub use coeffs::{
    CoefficientSet, FREEBSD, NAMED_SETS, SIXTH, TAIL300, TAIL400, TAIL500, TAIL700, TAIL800,
    TAIL900, TAIL996, TAYLOR,
};
pub use exp::{ExpVariant, correct, evaluate, exp, reconstruct};
pub use reduce::{LN2_HI, LN2_LO, LOG2_E, ReducedArgument, reduce};
pub use special::{NEAR_ZERO, OVERFLOW, UNDERFLOW, filter};

// ========= bit helpers =========

const EXP_MASK: u64 = 0x7ff0_0000_0000_0000u64;
const SIGN_MASK: u64 = 0x8000_0000_0000_0000u64;

#[inline(always)]
fn f64_from_bits(u: u64) -> f64 {
    f64::from_bits(u)
}
#[inline(always)]
fn f64_to_bits(x: f64) -> u64 {
    x.to_bits()
}

#[inline(always)]
fn get_exp_bits(u: u64) -> i32 {
    ((u >> 52) & 0x7ff) as i32
}

#[inline(always)]
fn is_nan_bits(u: u64) -> bool {
    (u & EXP_MASK) == EXP_MASK && (u & 0x000f_ffff_ffff_ffffu64) != 0
}
#[inline(always)]
fn is_inf_bits(u: u64) -> bool {
    (u & !SIGN_MASK) == EXP_MASK
}

/// ldexp(x, n): x * 2^n by writing the exponent field.
///
/// Normal results are exact. A subnormal result is built with its exponent
/// raised by 54 and brought down with a single multiplication, so it is
/// rounded exactly once.
#[inline(always)]
pub fn ldexp(mut x: f64, n: i32) -> f64 {
    let mut e = get_exp_bits(f64_to_bits(x));
    if e == 0x7ff {
        return x;
    }
    if e == 0 {
        if x == 0.0 {
            return x;
        }
        // normalize
        x *= f64_from_bits(0x4350_0000_0000_0000u64); // 2^54
        e = get_exp_bits(f64_to_bits(x)) - 54;
    }
    let ux = f64_to_bits(x);
    let ne = e.saturating_add(n);
    if ne >= 0x7ff {
        return f64_from_bits((ux & SIGN_MASK) | EXP_MASK);
    }
    if ne > 0 {
        return f64_from_bits((ux & !EXP_MASK) | ((ne as u64) << 52));
    }
    if ne < -53 {
        // below half the smallest subnormal
        return f64_from_bits(ux & SIGN_MASK);
    }
    f64_from_bits((ux & !EXP_MASK) | (((ne + 54) as u64) << 52))
        * f64_from_bits(0x3c90_0000_0000_0000u64) // 2^-54
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ldexp_normal_range_is_exact() {
        assert_eq!(ldexp(1.5, 3), 12.0);
        assert_eq!(ldexp(-0.75, -2), -0.1875);
        assert_eq!(ldexp(1.0, 1023), f64::from_bits(0x7fe0_0000_0000_0000));
        assert_eq!(ldexp(1.0, -1022), f64::MIN_POSITIVE);
    }

    #[test]
    fn test_ldexp_overflow_and_passthrough() {
        assert_eq!(ldexp(1.0, 1024), f64::INFINITY);
        assert_eq!(ldexp(-1.0, 5000), f64::NEG_INFINITY);
        assert_eq!(ldexp(0.75, 1024), 0.75 * 2f64.powi(1023) * 2.0);
        assert!(ldexp(f64::NAN, 3).is_nan());
        assert_eq!(ldexp(f64::INFINITY, -3000), f64::INFINITY);
        assert_eq!(ldexp(0.0, 100).to_bits(), 0.0f64.to_bits());
        assert_eq!(ldexp(-0.0, 100).to_bits(), (-0.0f64).to_bits());
    }

    #[test]
    fn test_ldexp_subnormal_rounds_once() {
        let tiny = f64::from_bits(1);
        assert_eq!(ldexp(1.0, -1074), tiny);
        // 1.5 * 2^-1074 is a tie between 1 and 2 ulps; ties go to even.
        assert_eq!(ldexp(1.5, -1074), f64::from_bits(2));
        assert_eq!(ldexp(1.25, -1074), tiny);
        // exactly half the smallest subnormal rounds to zero (even)
        assert_eq!(ldexp(1.0, -1075), 0.0);
        assert_eq!(ldexp(1.9, -1075), tiny);
        assert_eq!(ldexp(1.9, -1077), 0.0);
        assert_eq!(ldexp(-1.0, -1074), -tiny);
    }

    #[test]
    fn test_ldexp_from_subnormal_input() {
        let tiny = f64::from_bits(1);
        assert_eq!(ldexp(tiny, 1074), 1.0);
        assert_eq!(ldexp(tiny, 52), f64::from_bits(1u64 << 52));
        assert_eq!(ldexp(f64::from_bits(3), -1), f64::from_bits(2));
    }

    #[test]
    fn test_ldexp_matches_powi_scaling() {
        for &y in &[0.6931, 0.999_999_999_9, 1.0, 1.25, 1.414_213_562_373_095] {
            for k in [-1021, -500, -1, 0, 1, 17, 500, 1022] {
                assert_eq!(ldexp(y, k), y * 2f64.powi(k), "ldexp({y}, {k})");
            }
        }
    }
}
