use super::{f64_to_bits, is_inf_bits, is_nan_bits};

/// Largest x whose exp is finite.
pub const OVERFLOW: f64 = 7.09782712893383973096e+02;
/// Smallest x whose exp does not round to zero.
pub const UNDERFLOW: f64 = -7.45133219101941108420e+02;
/// 2^-28
pub const NEAR_ZERO: f64 = 1.0 / (1u64 << 28) as f64;

/// Settles inputs that never reach the reducer.
///
/// Returns `Some(result)` for NaN, infinities, arguments past the overflow
/// or underflow thresholds, and `|x| < 2^-28` (where `1 + x` is already
/// the correctly rounded value). `None` means the general path applies.
#[inline(always)]
pub fn filter(x: f64) -> Option<f64> {
    let ux = f64_to_bits(x);
    if is_nan_bits(ux) {
        return Some(x);
    }
    if is_inf_bits(ux) {
        return Some(if x.is_sign_negative() { 0.0 } else { x });
    }
    if x > OVERFLOW {
        return Some(f64::INFINITY);
    }
    if x < UNDERFLOW {
        return Some(0.0);
    }
    if -NEAR_ZERO < x && x < NEAR_ZERO {
        return Some(1.0 + x);
    }
    None
}
