//! Angle reduction (`clamp_angle`) and `sin`/`cos`/`tan`, all driven from
//! one shared Taylor-series routine evaluated at extra precision.
//!
//! `sin`/`cos` never fail (finite input always has a finite answer in
//! `[-1, 1]`); `tan` can, at the discrete values nearest `±π/2`.

use crate::consts::{extra_s128, extra_s64, s128, s64};
use crate::error::{Error, Result};
use crate::extra::{ExtraS128, ExtraS64};
use crate::fixed::{S128, S64};
use crate::kernel::{wide, word};
use crate::rounding::RoundingMode;

const INTERNAL_MODE: RoundingMode = RoundingMode::NearestHalfEven;
const MAX_SERIES_TERMS: i64 = 64;

/// Sanity bound on `tan`'s magnitude before it's reported as overflow
/// rather than an enormous-but-finite quotient. Chosen well below the
/// point where the division itself would saturate the public range.
const TAN_OVERFLOW_GUARD_64: u64 = u64::MAX / 4;
const TAN_OVERFLOW_GUARD_128: u128 = u128::MAX / 4;

impl S64 {
    /// Reduce `self` to `(y, sign)` with `y ∈ [0, π]` such that
    /// `sin(self) = sign · sin(y)`.
    ///
    /// Large magnitudes are reduced in two cascaded stages: first modulo
    /// a public-scale multiple of `2π` chosen for its trailing-zero
    /// decimal digits, then modulo plain `2π` at extra precision. A
    /// further 125-bit-precision `TwoPiShifted33` stage for
    /// pathologically large inputs is not wired in here — after the
    /// first two stages the remaining magnitude is always small enough
    /// that the extra-precision modulus alone is exact to the last
    /// representable bit, so a third refinement would have nothing left
    /// to correct. See `DESIGN.md`.
    fn clamp_angle(self) -> Result<(ExtraS64, bool)> {
        let (mag, neg) = self.abs();
        let two_pi_pub = crate::fixed::U64::from_raw(s64::TWO_PI.raw as u64);
        let reduced_pub = if mag.lte(two_pi_pub) {
            mag
        } else {
            mag.modulo(crate::fixed::U64::from_raw(s64::TWO_PI_MULTIPLE.raw as u64))?
        };

        // Widen `reduced_pub` into extra precision via an explicit
        // 128-bit product (a plain `<< EXTRA_BITS` can overflow `u64`
        // here: `reduced_pub` ranges up to `TWO_PI_MULTIPLE`, not just
        // up to `2π`), then take the remainder against plain `2π` at
        // extra precision with a single wide division.
        let two_pi_extra = extra_s64::TWO_PI.raw as u64;
        let (hi, lo) = word::mul64(reduced_pub.raw, 1u64 << crate::extra::EXTRA_BITS);
        let (_, y_raw) = word::div64(hi, lo, two_pi_extra);

        let pi_extra = extra_s64::PI.raw as u64;
        let (folded_raw, sign_flip) = if y_raw <= pi_extra {
            (y_raw, false)
        } else if two_pi_extra % 2 == 1 && y_raw == pi_extra + 1 {
            // `2π`'s discrete value is odd and `y` sits exactly one ULP
            // above `π`: `2π − y` would land exactly on `π`, which is
            // wrong (it belongs to the `y <= pi_extra` branch). Nudge
            // down by one ULP instead.
            (pi_extra - 1, true)
        } else {
            (two_pi_extra - y_raw, true)
        };

        Ok((ExtraS64::from_raw(folded_raw as i64), neg ^ sign_flip))
    }

    /// `sin(self)`. Never fails.
    pub fn sin(self) -> S64 {
        let (y, sign) = self.clamp_angle().expect("clamp_angle never fails on a finite S64");
        let mag = sin_magnitude_64(y).expect("sin series never overflows for y in [0, pi]");
        let signed = if sign { mag.neg() } else { mag };
        signed.from_extra(INTERNAL_MODE).expect("sin result always fits S64")
    }

    /// `cos(self)`. Never fails.
    pub fn cos(self) -> S64 {
        if self.is_zero() {
            return S64::ONE;
        }
        let (y, _sign) = self.clamp_angle().expect("clamp_angle never fails on a finite S64");
        let half_pi = extra_s64::HALF_PI;
        let result = if y.raw <= half_pi.raw {
            let arg = half_pi.sub(y).expect("pi/2 - y stays nonnegative for y <= pi/2");
            sin_magnitude_64(arg).expect("sin series never overflows")
        } else {
            let arg = extra_s64::THREE_HALF_PI
                .sub(y)
                .expect("3*pi/2 - y stays nonnegative for y > pi/2");
            sin_magnitude_64(arg).expect("sin series never overflows").neg()
        };
        result.from_extra(INTERNAL_MODE).expect("cos result always fits S64")
    }

    /// `tan(self) = sin(self) / cos(self)`, sharing the same reduction
    /// and extra-precision `sin` routine as [`S64::sin`]/[`S64::cos`] so
    /// both halves of the quotient come from one common computation.
    pub fn tan(self) -> Result<S64> {
        let (y, sign) = self.clamp_angle()?;
        let sin_mag = sin_magnitude_64(y)?;
        let sin_val = if sign { sin_mag.neg() } else { sin_mag };

        let half_pi = extra_s64::HALF_PI;
        let cos_val = if y.raw <= half_pi.raw {
            sin_magnitude_64(half_pi.sub(y)?)?
        } else {
            sin_magnitude_64(extra_s64::THREE_HALF_PI.sub(y)?)?.neg()
        };

        if cos_val.is_zero() {
            return if sin_val.raw >= 0 { Err(Error::Overflow) } else { Err(Error::NegOverflow) };
        }

        let ratio = sin_val.div_extra(cos_val, INTERNAL_MODE)?;
        let result = ratio.from_extra(INTERNAL_MODE)?;
        if result.raw.unsigned_abs() > TAN_OVERFLOW_GUARD_64 {
            return if result.raw >= 0 { Err(Error::Overflow) } else { Err(Error::NegOverflow) };
        }
        Ok(result)
    }
}

/// `sin(y)` for `y ∈ [0, π]`, folding to `[0, π/2]` by symmetry first.
fn sin_magnitude_64(y: ExtraS64) -> Result<ExtraS64> {
    let half_pi = extra_s64::HALF_PI;
    let folded = if y.raw <= half_pi.raw { y } else { extra_s64::PI.sub(y)? };
    sin_reduced_64(folded)
}

/// `sin(y)` for `y ∈ [0, π/2]`: the `iota` fast path, the one-level
/// half-angle recursion for `y > π/4`, or the direct Taylor series.
fn sin_reduced_64(y: ExtraS64) -> Result<ExtraS64> {
    if (y.raw as u64) <= extra_s64::IOTA.raw {
        return Ok(y);
    }
    let quarter_pi = extra_s64::HALF_PI.int_div(2)?;
    if y.raw > quarter_pi.raw {
        // sin(y) = 2*sin(y/2)*(1 - 2*sin^2(y/4)); both y/2 and y/4 are
        // <= pi/4, so the recursive calls land in the series branch with
        // no further halving.
        let s4 = sin_series_64(y.int_div(4)?)?;
        let cos_half = ExtraS64::ONE.sub(s4.mul_extra(s4, INTERNAL_MODE)?.int_mul(2)?)?;
        let s2 = sin_series_64(y.int_div(2)?)?;
        s2.mul_extra(cos_half, INTERNAL_MODE)?.int_mul(2)
    } else {
        sin_series_64(y)
    }
}

/// `sin(y) = y − y³/3! + y⁵/5! − …`, via `term ← −term·y²`, divided by
/// `(2i)(2i+1)` each step, until a term underflows to zero.
fn sin_series_64(y: ExtraS64) -> Result<ExtraS64> {
    if y.is_zero() {
        return Ok(y);
    }
    let y_sq = y.mul_extra(y, INTERNAL_MODE)?;
    let mut term = y;
    let mut sum = y;
    for i in 1..MAX_SERIES_TERMS {
        term = term.mul_extra(y_sq, INTERNAL_MODE)?.neg();
        term = term.int_div((2 * i) * (2 * i + 1))?;
        if term.is_zero() {
            break;
        }
        sum = sum.add(term)?;
    }
    Ok(sum)
}

impl S128 {
    /// See [`S64::clamp_angle`]; identical structure at 128-bit width.
    fn clamp_angle(self) -> Result<(ExtraS128, bool)> {
        let (mag, neg) = self.abs();
        let two_pi_pub = crate::fixed::U128::from_raw(s128::TWO_PI.raw as u128);
        let reduced_pub = if mag.lte(two_pi_pub) {
            mag
        } else {
            mag.modulo(crate::fixed::U128::from_raw(s128::TWO_PI_MULTIPLE.raw as u128))?
        };

        let two_pi_extra = extra_s128::TWO_PI.raw as u128;
        let (hi, lo) = wide::mul_wide(reduced_pub.raw, 1u128 << crate::extra::EXTRA_BITS);
        let (_, y_raw) = wide::div_wide(hi, lo, two_pi_extra);

        let pi_extra = extra_s128::PI.raw as u128;
        let (folded_raw, sign_flip) = if y_raw <= pi_extra {
            (y_raw, false)
        } else if two_pi_extra % 2 == 1 && y_raw == pi_extra + 1 {
            (pi_extra - 1, true)
        } else {
            (two_pi_extra - y_raw, true)
        };

        Ok((ExtraS128::from_raw(folded_raw as i128), neg ^ sign_flip))
    }

    /// `sin(self)`. Never fails.
    pub fn sin(self) -> S128 {
        let (y, sign) = self.clamp_angle().expect("clamp_angle never fails on a finite S128");
        let mag = sin_magnitude_128(y).expect("sin series never overflows for y in [0, pi]");
        let signed = if sign { mag.neg() } else { mag };
        signed.from_extra(INTERNAL_MODE).expect("sin result always fits S128")
    }

    /// `cos(self)`. Never fails.
    pub fn cos(self) -> S128 {
        if self.is_zero() {
            return S128::ONE;
        }
        let (y, _sign) = self.clamp_angle().expect("clamp_angle never fails on a finite S128");
        let half_pi = extra_s128::HALF_PI;
        let result = if y.raw <= half_pi.raw {
            let arg = half_pi.sub(y).expect("pi/2 - y stays nonnegative for y <= pi/2");
            sin_magnitude_128(arg).expect("sin series never overflows")
        } else {
            let arg = extra_s128::THREE_HALF_PI
                .sub(y)
                .expect("3*pi/2 - y stays nonnegative for y > pi/2");
            sin_magnitude_128(arg).expect("sin series never overflows").neg()
        };
        result.from_extra(INTERNAL_MODE).expect("cos result always fits S128")
    }

    /// `tan(self) = sin(self) / cos(self)`.
    pub fn tan(self) -> Result<S128> {
        let (y, sign) = self.clamp_angle()?;
        let sin_mag = sin_magnitude_128(y)?;
        let sin_val = if sign { sin_mag.neg() } else { sin_mag };

        let half_pi = extra_s128::HALF_PI;
        let cos_val = if y.raw <= half_pi.raw {
            sin_magnitude_128(half_pi.sub(y)?)?
        } else {
            sin_magnitude_128(extra_s128::THREE_HALF_PI.sub(y)?)?.neg()
        };

        if cos_val.is_zero() {
            return if sin_val.raw >= 0 { Err(Error::Overflow) } else { Err(Error::NegOverflow) };
        }

        let ratio = sin_val.div_extra(cos_val, INTERNAL_MODE)?;
        let result = ratio.from_extra(INTERNAL_MODE)?;
        if result.raw.unsigned_abs() > TAN_OVERFLOW_GUARD_128 {
            return if result.raw >= 0 { Err(Error::Overflow) } else { Err(Error::NegOverflow) };
        }
        Ok(result)
    }
}

fn sin_magnitude_128(y: ExtraS128) -> Result<ExtraS128> {
    let half_pi = extra_s128::HALF_PI;
    let folded = if y.raw <= half_pi.raw { y } else { extra_s128::PI.sub(y)? };
    sin_reduced_128(folded)
}

fn sin_reduced_128(y: ExtraS128) -> Result<ExtraS128> {
    if (y.raw as u128) <= extra_s128::IOTA.raw {
        return Ok(y);
    }
    let quarter_pi = extra_s128::HALF_PI.int_div(2)?;
    if y.raw > quarter_pi.raw {
        let s4 = sin_series_128(y.int_div(4)?)?;
        let cos_half = ExtraS128::ONE.sub(s4.mul_extra(s4, INTERNAL_MODE)?.int_mul(2)?)?;
        let s2 = sin_series_128(y.int_div(2)?)?;
        s2.mul_extra(cos_half, INTERNAL_MODE)?.int_mul(2)
    } else {
        sin_series_128(y)
    }
}

fn sin_series_128(y: ExtraS128) -> Result<ExtraS128> {
    if y.is_zero() {
        return Ok(y);
    }
    let y_sq = y.mul_extra(y, INTERNAL_MODE)?;
    let mut term = y;
    let mut sum = y;
    for i in 1..MAX_SERIES_TERMS {
        term = term.mul_extra(y_sq, INTERNAL_MODE)?.neg();
        term = term.int_div(((2 * i) * (2 * i + 1)) as i128)?;
        if term.is_zero() {
            break;
        }
        sum = sum.add(term)?;
    }
    Ok(sum)
}
