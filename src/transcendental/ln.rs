//! Natural logarithm: power-of-two range reduction into a narrow
//! neighbourhood of 1, then an odd-power series evaluated at extra
//! precision.

use crate::consts::{extra_s128, extra_s64};
use crate::error::{Error, Result};
use crate::extra::{ExtraS128, ExtraS64};
use crate::fixed::{S128, S64, U128, U64};
use crate::kernel::{wide, word};
use crate::rounding::RoundingMode;

/// Internal rounding mode for every transcendental's intermediate
/// extra-precision arithmetic. Fixed and documented once here: changing
/// it changes every transcendental's bit output.
const INTERNAL_MODE: RoundingMode = RoundingMode::NearestHalfEven;

/// Maximum odd-power series terms before giving up — the series always
/// terminates sooner because terms underflow to zero at the
/// extra-precision scale, this just bounds worst case.
const MAX_SERIES_TERMS: u32 = 64;

impl U64 {
    /// `ln(x)`; `x` must be strictly positive.
    pub fn ln(self) -> Result<S64> {
        if self.is_zero() {
            return Err(Error::Domain);
        }
        let low = Self::SCALE - Self::SCALE / 3;
        let high = Self::SCALE + Self::SCALE / 3;
        let (reduced_raw, k) = reduce_near_one_64(self.raw, Self::SCALE, low, high);
        let reduced = ExtraS64::to_extra(S64::from_raw(reduced_raw as i64));

        let z = reduced.sub(ExtraS64::ONE)?.div_extra(reduced.add(ExtraS64::ONE)?, INTERNAL_MODE)?;
        let z_sq = z.mul_extra(z, INTERNAL_MODE)?;

        let mut term = z;
        let mut sum = z;
        for i in 1..MAX_SERIES_TERMS {
            term = term.mul_extra(z_sq, INTERNAL_MODE)?;
            let divisor = 2 * i as i64 + 1;
            let addend = term.int_div(divisor)?;
            if addend.is_zero() {
                break;
            }
            sum = sum.add(addend)?;
        }

        let two_sum = sum.add(sum)?;
        let k_ln2 = extra_s64::LN_2.int_mul(k as i64)?;
        let result_extra = two_sum.sub(k_ln2)?;
        result_extra.from_extra(INTERNAL_MODE)
    }
}

impl U128 {
    /// `ln(x)`; `x` must be strictly positive.
    pub fn ln(self) -> Result<S128> {
        if self.is_zero() {
            return Err(Error::Domain);
        }
        let low = Self::SCALE * 3 / 5;
        let high = Self::SCALE + Self::SCALE * 21 / 100;
        let (reduced_raw, k) = reduce_near_one_128(self.raw, Self::SCALE, low, high);
        let reduced = ExtraS128::to_extra(S128::from_raw(reduced_raw as i128));

        let z = reduced.sub(ExtraS128::ONE)?.div_extra(reduced.add(ExtraS128::ONE)?, INTERNAL_MODE)?;
        let z_sq = z.mul_extra(z, INTERNAL_MODE)?;

        let mut term = z;
        let mut sum = z;
        for i in 1..MAX_SERIES_TERMS {
            term = term.mul_extra(z_sq, INTERNAL_MODE)?;
            let divisor = 2 * i as i128 + 1;
            let addend = term.int_div(divisor)?;
            if addend.is_zero() {
                break;
            }
            sum = sum.add(addend)?;
        }

        let two_sum = sum.add(sum)?;
        let k_ln2 = extra_s128::LN_2.int_mul(k as i128)?;
        let result_extra = two_sum.sub(k_ln2)?;
        result_extra.from_extra(INTERNAL_MODE)
    }
}

/// Find `k` and `reduced = x << k` (as a signed shift) such that `reduced`
/// lands in `[low, high]` around `scale` (representing 1.0). Starts from
/// a bit-length-matched shift and nudges by one power of two at a time —
/// the target window is wide enough (a factor of ~2) that at most one
/// nudge is ever needed after the initial alignment.
fn reduce_near_one_64(x: u64, scale: u64, low: u64, high: u64) -> (u64, i32) {
    let lz_x = word::leading_zeros64(x) as i32;
    let lz_scale = word::leading_zeros64(scale) as i32;
    let mut k = lz_x - lz_scale;
    let mut reduced = shift_signed_64(x, k);
    while reduced < low {
        k += 1;
        reduced = shift_signed_64(x, k);
    }
    while reduced > high {
        k -= 1;
        reduced = shift_signed_64(x, k);
    }
    (reduced, k)
}

fn shift_signed_64(x: u64, k: i32) -> u64 {
    if k >= 0 {
        word::shl64(x, k as u32)
    } else {
        word::shr64_logical(x, (-k) as u32)
    }
}

fn reduce_near_one_128(x: u128, scale: u128, low: u128, high: u128) -> (u128, i32) {
    let lz_x = wide::leading_zeros128(x) as i32;
    let lz_scale = wide::leading_zeros128(scale) as i32;
    let mut k = lz_x - lz_scale;
    let mut reduced = shift_signed_128(x, k);
    while reduced < low {
        k += 1;
        reduced = shift_signed_128(x, k);
    }
    while reduced > high {
        k -= 1;
        reduced = shift_signed_128(x, k);
    }
    (reduced, k)
}

fn shift_signed_128(x: u128, k: i32) -> u128 {
    if k >= 0 {
        wide::shl128(x, k as u32)
    } else {
        wide::shr128_logical(x, (-k) as u32)
    }
}
