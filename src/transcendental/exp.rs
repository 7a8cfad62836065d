//! Exponential: range-reduce to `k·ln2 + r`, evaluate a Taylor series on
//! `r` at extra precision, then recombine by a power-of-two shift (or,
//! for negative inputs, a reciprocal that never forms `exp(|x|)`
//! directly — that intermediate can overflow even when the true result,
//! `exp(x)` for very negative `x`, is a tiny but perfectly valid value).

use crate::consts::{extra_s128, extra_s64, s128, s64};
use crate::error::{Error, Result};
use crate::extra::{ExtraU128, ExtraU64};
use crate::fixed::{S128, S64, U128, U64};
use crate::kernel::wide;
use crate::rounding::RoundingMode;

const INTERNAL_MODE: RoundingMode = RoundingMode::NearestHalfEven;
const MAX_SERIES_TERMS: u32 = 64;

impl S64 {
    /// `exp(x)`.
    pub fn exp(self) -> Result<U64> {
        if self.gt(s64::MAX_LN) {
            return Err(Error::Overflow);
        }
        if self.lt(s64::MIN_LN) {
            return Err(Error::Underflow);
        }

        let (mag, neg) = self.abs();
        let mag_extra = ExtraU64::to_extra(mag);
        let ln2_raw = extra_s64::LN_2.raw as u64;
        let k = mag_extra.raw / ln2_raw;
        let r = ExtraU64::from_raw(mag_extra.raw % ln2_raw);

        let sum = exp_series_u64(r)?;

        if !neg {
            recombine_positive_u64(sum, k)
        } else {
            recombine_negative_u64(sum, k)
        }
    }
}

impl S128 {
    /// `exp(x)`.
    pub fn exp(self) -> Result<U128> {
        if self.gt(s128::MAX_LN) {
            return Err(Error::Overflow);
        }
        if self.lt(s128::MIN_LN) {
            return Err(Error::Underflow);
        }

        let (mag, neg) = self.abs();
        let mag_extra = ExtraU128::to_extra(mag);
        let ln2_raw = extra_s128::LN_2.raw as u128;
        let k = (mag_extra.raw / ln2_raw) as u32;
        let r = ExtraU128::from_raw(mag_extra.raw % ln2_raw);

        let sum = exp_series_u128(r)?;

        if !neg {
            recombine_positive_u128(sum, k)
        } else {
            recombine_negative_u128(sum, k)
        }
    }
}

/// `Σ rⁿ/n!` via `term ← term·r/seriesScale` then `term ← term/n`.
fn exp_series_u64(r: ExtraU64) -> Result<ExtraU64> {
    let mut term = ExtraU64::ONE;
    let mut sum = ExtraU64::ONE;
    for n in 1..MAX_SERIES_TERMS {
        term = term.mul_extra(r, INTERNAL_MODE)?;
        term = term.int_div(n as u64)?;
        if term.is_zero() {
            break;
        }
        sum = sum.add(term)?;
    }
    Ok(sum)
}

fn exp_series_u128(r: ExtraU128) -> Result<ExtraU128> {
    let mut term = ExtraU128::ONE;
    let mut sum = ExtraU128::ONE;
    for n in 1..MAX_SERIES_TERMS {
        term = term.mul_extra(r, INTERNAL_MODE)?;
        term = term.int_div(n as u128)?;
        if term.is_zero() {
            break;
        }
        sum = sum.add(term)?;
    }
    Ok(sum)
}

/// `exp(x) = e^r · 2^k` for `x ≥ 0`. Since `seriesScale = Scale64 · 2^21`,
/// multiplying `sum` by `2^k` and dividing by `seriesScale` to land back
/// at the public scale collapses to a pure shift by `k − 21`.
fn recombine_positive_u64(sum: ExtraU64, k: u64) -> Result<U64> {
    let net_shift = k as i64 - 21;
    if net_shift >= 0 {
        let shifted = (sum.raw as u128) << net_shift;
        if shifted > u64::MAX as u128 {
            return Err(Error::Overflow);
        }
        Ok(U64::from_raw(shifted as u64))
    } else {
        let shift = (-net_shift) as u32;
        let d = 1u64 << shift;
        let q = sum.raw >> shift;
        let r = sum.raw & (d - 1);
        let round_up = crate::kernel::word::should_round64(q, r, d, INTERNAL_MODE);
        if round_up {
            q.checked_add(1).map(U64::from_raw).ok_or(Error::Overflow)
        } else {
            Ok(U64::from_raw(q))
        }
    }
}

fn recombine_positive_u128(sum: ExtraU128, k: u32) -> Result<U128> {
    let net_shift = k as i64 - 21;
    if net_shift >= 0 {
        let (hi, lo) = wide::mul_wide(sum.raw, 1u128 << net_shift);
        if hi != 0 {
            return Err(Error::Overflow);
        }
        Ok(U128::from_raw(lo))
    } else {
        let shift = (-net_shift) as u32;
        let d = 1u128 << shift;
        let q = sum.raw >> shift;
        let r = sum.raw & (d - 1);
        let round_up = wide::should_round128(q, r, d, INTERNAL_MODE);
        if round_up {
            q.checked_add(1).map(U128::from_raw).ok_or(Error::Overflow)
        } else {
            Ok(U128::from_raw(q))
        }
    }
}

/// `exp(−|x|) = Scale64 · ExtraScale64 / (sum.raw · 2^k)`, computed
/// directly as a reciprocal rather than through `exp(|x|)` — the latter
/// can overflow even when the true (tiny) result is perfectly valid.
/// `U64`'s widest intermediate here still fits in a `u128`, so no wide
/// kernel support is needed.
fn recombine_negative_u64(sum: ExtraU64, k: u64) -> Result<U64> {
    let numerator = (U64::SCALE as u128) * (ExtraU64::EXTRA_SCALE as u128);
    let denom = (sum.raw as u128)
        .checked_shl(k as u32)
        .ok_or(Error::Underflow)?;
    let q = numerator / denom;
    let r = numerator % denom;
    let round_up = wide::should_round128(q, r, denom, INTERNAL_MODE);
    if q == 0 && r != 0 && !round_up {
        return Err(Error::Underflow);
    }
    let q = if round_up { q + 1 } else { q };
    Ok(U64::from_raw(q as u64))
}

/// As [`recombine_negative_u64`], but `U128`'s own widest intermediate
/// (`Scale128² ≈ 10^48`, `sum.raw · 2^k` up to ~2^158) overflows even a
/// `u128`. The `2^k` factor is split across two rounded steps — first
/// shrinking `sum` by `2^(k/2)`, then folding the remaining `2^(k − k/2)`
/// into the final divisor — so neither intermediate value the wide
/// kernel has to hold ever exceeds 128 bits.
fn recombine_negative_u128(sum: ExtraU128, k: u32) -> Result<U128> {
    let k1 = k / 2;
    let k2 = k - k1;

    let d1 = 1u128 << k1;
    let q1 = sum.raw >> k1;
    let r1 = sum.raw & (d1 - 1);
    let shrunk = if wide::should_round128(q1, r1, d1, INTERNAL_MODE) { q1 + 1 } else { q1 };

    let denom = shrunk.checked_shl(k2).ok_or(Error::Underflow)?;
    let (n_hi, n_lo) = wide::mul_wide(U128::SCALE, U128::SCALE);
    if n_hi >= denom {
        return Err(Error::Underflow);
    }
    let (q, r) = wide::div_wide(n_hi, n_lo, denom);
    let round_up = wide::should_round128(q, r, denom, INTERNAL_MODE);
    if q == 0 && r != 0 && !round_up {
        return Err(Error::Underflow);
    }
    let q = if round_up { q.checked_add(1).ok_or(Error::Overflow)? } else { q };
    Ok(U128::from_raw(q))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exp_zero_is_one() {
        let result = S64::ZERO.exp().unwrap();
        assert_eq!(result, U64::ONE);
    }

    #[test]
    fn exp_above_max_ln_overflows() {
        assert_eq!(s64::MAX_LN.add(S64::ONE).unwrap().exp(), Err(Error::Overflow));
    }

    #[test]
    fn exp_below_min_ln_underflows() {
        assert_eq!(s64::MIN_LN.sub(S64::ONE).unwrap().exp(), Err(Error::Underflow));
    }

    #[test]
    fn exp_of_ln_two_is_near_two() {
        let ln2 = S64::from_raw(extra_s64::LN_2.raw >> 21);
        let result = ln2.exp().unwrap();
        let two = U64::from_raw(2 * U64::SCALE);
        let diff = if result.raw > two.raw { result.raw - two.raw } else { two.raw - result.raw };
        assert!(diff <= 2);
    }

    #[test]
    fn exp_negative_one_is_between_zero_and_one() {
        let result = S64::NEG_ONE.exp().unwrap();
        assert!(result.raw < U64::ONE.raw);
        assert!(result.raw > 0);
    }
}
