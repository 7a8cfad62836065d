//! L2: wide (128/192/256-bit) kernel.
//!
//! `raw128` is represented here as a plain `u128` rather than a hand-rolled
//! `{hi: u64, lo: u64}` struct: `u128` is itself a portable, deterministic
//! compiler-builtin type, so reinventing it buys nothing. What genuinely
//! has to be hand-built is the 256/128→128 division, since Rust has no
//! native 256-bit integer to divide a `u128` into — that Knuth-style long
//! division is the one irreducible piece of multi-word engineering this
//! module exists for.

use core::cmp::Ordering;

use crate::kernel::word;
use crate::rounding::RoundingMode;

/// Full 128×128→256 product, returned as `(hi, lo)` 128-bit halves.
///
/// Schoolbook multiplication across four 64×64→128 partial products with
/// explicit carry tracking into the next column.
#[inline]
pub fn mul_wide(a: u128, b: u128) -> (u128, u128) {
    let a_lo = a as u64 as u128;
    let a_hi = (a >> 64) as u64 as u128;
    let b_lo = b as u64 as u128;
    let b_hi = (b >> 64) as u64 as u128;

    let p00 = a_lo * b_lo;
    let p01 = a_lo * b_hi;
    let p10 = a_hi * b_lo;
    let p11 = a_hi * b_hi;

    let (mid, mid_overflow) = p01.overflowing_add(p10);

    let (lo, carry_lo) = p00.overflowing_add(mid << 64);
    let hi = p11 + (mid >> 64) + ((mid_overflow as u128) << 64) + carry_lo as u128;

    (hi, lo)
}

/// The Knuth single-digit estimate/refine/correct step: divide the
/// 192-bit dividend `(u2, u1, u0)` by the 128-bit divisor `d`, producing
/// a 64-bit quotient digit and the 128-bit remainder.
///
/// `d` must be normalized (its top bit set) before calling; callers
/// normalize both the divisor and the dividend by the same shift amount.
/// The standard Knuth Algorithm D 3-by-2 estimate/refine/add-back step.
#[inline]
pub fn div192by128(u2: u64, u1: u64, u0: u64, d: u128) -> (u64, u128) {
    let d_hi = (d >> 64) as u64;
    let d_lo = d as u64;
    debug_assert!(d_hi & (1 << 63) != 0, "div192by128: divisor must be normalized");

    let n_hi = ((u2 as u128) << 64) | u1 as u128;

    let mut q_hat = if u2 >= d_hi { u64::MAX } else { (n_hi / d_hi as u128) as u64 };
    let mut r_hat = n_hi - (q_hat as u128) * (d_hi as u128);

    while r_hat <= u64::MAX as u128 {
        let lhs = (q_hat as u128) * (d_lo as u128);
        let rhs = (r_hat << 64) | u0 as u128;
        if lhs <= rhs {
            break;
        }
        q_hat -= 1;
        r_hat += d_hi as u128;
    }

    // Subtract q_hat * d from (u2, u1, u0); back off by one if it overshot.
    let product_lo = (q_hat as u128) * (d_lo as u128);
    let product_hi = (q_hat as u128) * (d_hi as u128) + (product_lo >> 64);

    let (sub_lo, borrow1) = (u0 as u128).overflowing_sub(product_lo & u64::MAX as u128);
    let (sub_mid, borrow2) =
        (u1 as u128).overflowing_sub((product_hi & u64::MAX as u128) + borrow1 as u128);
    let sub_hi = (u2 as u128).wrapping_sub((product_hi >> 64) + borrow2 as u128);

    if sub_hi > u2 as u128 {
        // Over-subtracted: add one divisor back and decrement the digit.
        let add_lo = sub_lo.wrapping_add(d_lo as u128);
        let carry = (add_lo < sub_lo) as u128;
        let add_mid = sub_mid.wrapping_add(d_hi as u128 + carry);
        let rem = (add_mid << 64) | (add_lo & u64::MAX as u128);
        (q_hat - 1, rem)
    } else {
        let rem = ((sub_mid & u64::MAX as u128) << 64) | (sub_lo & u64::MAX as u128);
        (q_hat, rem)
    }
}

/// 256/128→128 division: divide the 256-bit dividend `(hi, lo)` by `d`.
///
/// # Panics
///
/// Panics if `d == 0` or the quotient does not fit in 128 bits (`hi >= d`).
#[inline]
pub fn div_wide(hi: u128, lo: u128, d: u128) -> (u128, u128) {
    assert_ne!(d, 0, "div_wide: division by zero");
    assert!(hi < d, "div_wide: quotient does not fit in 128 bits");

    if hi == 0 {
        return (lo / d, lo % d);
    }

    if (d >> 64) == 0 {
        // Divisor fits in 64 bits: `hi < d` forces `hi < 2^64` too, so this
        // reduces to three ordinary 128/64 word divisions.
        let d64 = d as u64;
        let lo_hi = (lo >> 64) as u64;
        let lo_lo = lo as u64;
        let (q1, r1) = word::div64(hi as u64, lo_hi, d64);
        let (q0, r0) = word::div64(r1, lo_lo, d64);
        return (((q1 as u128) << 64) | q0 as u128, r0 as u128);
    }

    let shift = d.leading_zeros();
    let d_norm = d << shift;
    let (n3, n2, n1, n0) = shl_u256(hi, lo, shift);

    let (q_hi, rem1) = div192by128(n3, n2, n1, d_norm);
    let r1_hi = (rem1 >> 64) as u64;
    let r1_lo = rem1 as u64;
    let (q_lo, rem_final_shifted) = div192by128(r1_hi, r1_lo, n0, d_norm);

    let q = ((q_hi as u128) << 64) | q_lo as u128;
    (q, rem_final_shifted >> shift)
}

/// Shift the 256-bit value `(hi, lo)` left by `shift` (`< 128`) bits,
/// returning the four 64-bit limbs of the 320-bit result from most to
/// least significant: `(n3, n2, n1, n0)`. `n3` captures the overflow bits
/// that spill out of `hi` during normalization.
#[inline]
fn shl_u256(hi: u128, lo: u128, shift: u32) -> (u64, u64, u64, u64) {
    if shift == 0 {
        return ((hi >> 64) as u64, hi as u64, (lo >> 64) as u64, lo as u64);
    }
    let hi_shifted = (hi << shift) | (lo >> (128 - shift));
    let lo_shifted = lo << shift;
    (
        (hi_shifted >> 64) as u64,
        hi_shifted as u64,
        (lo_shifted >> 64) as u64,
        lo_shifted as u64,
    )
}

#[inline]
pub fn leading_zeros128(x: u128) -> u32 {
    x.leading_zeros()
}

#[inline]
pub fn ult128(a: u128, b: u128) -> bool {
    a < b
}

#[inline]
pub fn slt128(a: i128, b: i128) -> bool {
    a < b
}

#[inline]
pub fn shl128(x: u128, n: u32) -> u128 {
    if n >= 128 { 0 } else { x << n }
}

#[inline]
pub fn shr128_logical(x: u128, n: u32) -> u128 {
    if n >= 128 { 0 } else { x >> n }
}

#[inline]
pub fn shr128_arith(x: i128, n: u32) -> i128 {
    if n >= 128 {
        if x < 0 { -1 } else { 0 }
    } else {
        x >> n
    }
}

/// Mirrors [`word::should_round64`] at 128-bit width: `rem` can be as
/// large as `d - 1 <= u128::MAX - 1`, so doubling it can overflow `u128`.
/// We test the top bit directly instead of widening further, since there
/// is no native 256-bit integer to widen into.
#[inline]
fn compare_2r_d(r: u128, d: u128) -> Ordering {
    if r & (1 << 127) != 0 {
        Ordering::Greater
    } else {
        (2 * r).cmp(&d)
    }
}

#[inline]
pub fn should_round128(q: u128, r: u128, d: u128, mode: RoundingMode) -> bool {
    if r == 0 {
        return false;
    }
    match mode {
        RoundingMode::TowardZero => false,
        RoundingMode::AwayFromZero => true,
        RoundingMode::NearestHalfAway => match compare_2r_d(r, d) {
            Ordering::Greater | Ordering::Equal => true,
            Ordering::Less => false,
        },
        RoundingMode::NearestHalfEven => match compare_2r_d(r, d) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => q & 1 == 1,
        },
    }
}
