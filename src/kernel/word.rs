//! L1: 64-bit word kernel.
//!
//! Plain `u64`/`i64` arithmetic primitives with explicit carry/borrow and
//! rounding, operating directly on native 64-bit words rather than a
//! split two-`u32`-limb representation: the target host is always
//! assumed to support 64-bit integers, and `u128` widening multiply/divide
//! is a portable compiler builtin, not a hardware-specific fast path.

use core::cmp::Ordering;

use crate::rounding::RoundingMode;

/// `a + b + carry_in`, returning the 64-bit sum and the carry out.
#[inline]
pub fn add64(a: u64, b: u64, carry_in: bool) -> (u64, bool) {
    let (s1, c1) = a.overflowing_add(b);
    let (s2, c2) = s1.overflowing_add(carry_in as u64);
    (s2, c1 || c2)
}

/// `a - b - borrow_in`, returning the 64-bit difference and the borrow out.
#[inline]
pub fn sub64(a: u64, b: u64, borrow_in: bool) -> (u64, bool) {
    let (d1, b1) = a.overflowing_sub(b);
    let (d2, b2) = d1.overflowing_sub(borrow_in as u64);
    (d2, b1 || b2)
}

/// Full 64×64→128 product, returned as `(hi, lo)`.
#[inline]
pub fn mul64(a: u64, b: u64) -> (u64, u64) {
    let p = (a as u128) * (b as u128);
    ((p >> 64) as u64, p as u64)
}

/// 128/64→64 division: divide the two-word dividend `(hi, lo)` by `d`.
///
/// # Panics
///
/// Panics if `d == 0`, or if the true quotient does not fit in 64 bits
/// (i.e. `hi >= d`). Callers that cannot establish `hi < d` ahead of time
/// must check it themselves before calling.
#[inline]
pub fn div64(hi: u64, lo: u64, d: u64) -> (u64, u64) {
    assert_ne!(d, 0, "div64: division by zero");
    assert!(hi < d, "div64: quotient does not fit in 64 bits");
    let n = ((hi as u128) << 64) | lo as u128;
    let q = n / d as u128;
    let r = n % d as u128;
    (q as u64, r as u64)
}

#[inline]
pub fn leading_zeros64(x: u64) -> u32 {
    x.leading_zeros()
}

#[inline]
pub fn is_zero64(x: u64) -> bool {
    x == 0
}

#[inline]
pub fn is_neg64(x: i64) -> bool {
    x < 0
}

#[inline]
pub fn ult64(a: u64, b: u64) -> bool {
    a < b
}

#[inline]
pub fn slt64(a: i64, b: i64) -> bool {
    a < b
}

#[inline]
pub fn shl64(x: u64, n: u32) -> u64 {
    if n >= 64 { 0 } else { x << n }
}

#[inline]
pub fn shr64_logical(x: u64, n: u32) -> u64 {
    if n >= 64 { 0 } else { x >> n }
}

#[inline]
pub fn shr64_arith(x: i64, n: u32) -> i64 {
    if n >= 64 {
        if x < 0 { -1 } else { 0 }
    } else {
        x >> n
    }
}

/// Compare `2*r` against `d` without letting the doubling overflow.
///
/// `r` is always `< d <= u64::MAX`, so `2*r` can exceed `u64::MAX`. Rather
/// than widen to `u128`, observe that if `r > u64::MAX / 2` then `2*r`
/// would already exceed any representable `d`, so the comparison is
/// unconditionally `Greater`.
#[inline]
fn compare_2r_d(r: u64, d: u64) -> Ordering {
    if r > u64::MAX / 2 {
        Ordering::Greater
    } else {
        (2 * r).cmp(&d)
    }
}

/// Decide whether a truncated quotient `q` (with remainder `r` against
/// divisor `d`) should be rounded up by one, under `mode`.
#[inline]
pub fn should_round64(q: u64, r: u64, d: u64, mode: RoundingMode) -> bool {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add64_carries() {
        assert_eq!(add64(u64::MAX, 1, false), (0, true));
        assert_eq!(add64(u64::MAX, 0, true), (0, true));
        assert_eq!(add64(1, 1, false), (2, false));
    }

    #[test]
    fn sub64_borrows() {
        assert_eq!(sub64(0, 1, false), (u64::MAX, true));
        assert_eq!(sub64(5, 2, false), (3, false));
    }

    #[test]
    fn mul64_matches_u128() {
        let a = 0xFFFF_FFFF_FFFF_FFFFu64;
        let b = 2u64;
        let (hi, lo) = mul64(a, b);
        let expected = (a as u128) * (b as u128);
        assert_eq!(((hi as u128) << 64) | lo as u128, expected);
    }

    #[test]
    fn div64_basic() {
        assert_eq!(div64(0, 10, 3), (3, 1));
        assert_eq!(div64(1, 0, 2), (1u64 << 63, 0));
    }

    #[test]
    #[should_panic]
    fn div64_zero_divisor_panics() {
        div64(0, 1, 0);
    }

    #[test]
    fn should_round_toward_zero_never_rounds() {
        assert!(!should_round64(3, 9, 10, RoundingMode::TowardZero));
    }

    #[test]
    fn should_round_away_from_zero_rounds_any_remainder() {
        assert!(should_round64(3, 1, 10, RoundingMode::AwayFromZero));
        assert!(!should_round64(3, 0, 10, RoundingMode::AwayFromZero));
    }

    #[test]
    fn should_round_half_away_ties_round_up() {
        assert!(should_round64(3, 5, 10, RoundingMode::NearestHalfAway));
        assert!(!should_round64(3, 4, 10, RoundingMode::NearestHalfAway));
        assert!(should_round64(3, 6, 10, RoundingMode::NearestHalfAway));
    }

    #[test]
    fn should_round_half_even_ties_go_to_even_quotient() {
        assert!(!should_round64(4, 5, 10, RoundingMode::NearestHalfEven));
        assert!(should_round64(3, 5, 10, RoundingMode::NearestHalfEven));
    }

    #[test]
    fn compare_2r_d_handles_large_r_without_overflow() {
        let r = u64::MAX / 2 + 1;
        let d = u64::MAX;
        assert_eq!(compare_2r_d(r, d), Ordering::Greater);
    }
}
