//! Unsigned 64-bit fixed-point value at scale `10^8`.

use core::cmp::Ordering;

use crate::error::{Error, Result};
use crate::fixed::u128::U128;
use crate::kernel::word;
use crate::rounding::RoundingMode;

/// `integer_value / SCALE` stored as a plain `u64`. No negative zero: the
/// all-zero bit pattern is the unique representation of zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct U64 {
    pub raw: u64,
}

impl U64 {
    pub const SCALE: u64 = 100_000_000;
    pub const ZERO: Self = Self { raw: 0 };
    pub const ONE: Self = Self { raw: Self::SCALE };
    pub const MIN: Self = Self::ZERO;
    pub const MAX: Self = Self { raw: u64::MAX };

    /// `U64 → U128` widening: exact, since `Scale128 / Scale64 = 10^16`.
    const WIDEN_FACTOR: u128 = 10_000_000_000_000_000;

    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self { raw }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        word::is_zero64(self.raw)
    }

    #[inline]
    pub fn add(self, rhs: Self) -> Result<Self> {
        self.raw
            .checked_add(rhs.raw)
            .map(Self::from_raw)
            .ok_or(Error::Overflow)
    }

    /// Any borrow out of `Sub` is reported as `Overflow`: an unsigned type
    /// has no negative range to report `NegOverflow` into.
    #[inline]
    pub fn sub(self, rhs: Self) -> Result<Self> {
        self.raw
            .checked_sub(rhs.raw)
            .map(Self::from_raw)
            .ok_or(Error::Overflow)
    }

    /// Full double-width product divided by `SCALE`, with rounding.
    #[inline]
    pub fn mul(self, rhs: Self, mode: RoundingMode) -> Result<Self> {
        let (hi, lo) = word::mul64(self.raw, rhs.raw);
        Self::scale_down(hi, lo, Self::SCALE, mode)
    }

    /// Numerator widened by `SCALE`, then divided by the denominator.
    #[inline]
    pub fn div(self, rhs: Self, mode: RoundingMode) -> Result<Self> {
        if rhs.is_zero() {
            return Err(Error::DivByZero);
        }
        let (hi, lo) = word::mul64(self.raw, Self::SCALE);
        Self::scale_down(hi, lo, rhs.raw, mode)
    }

    /// `(a·b)/c` via a single widening multiply and a single rounded
    /// divide — the precision-preserving alternative to `mul` then `div`.
    #[inline]
    pub fn fmd(self, b: Self, c: Self, mode: RoundingMode) -> Result<Self> {
        if c.is_zero() {
            return Err(Error::DivByZero);
        }
        let (hi, lo) = word::mul64(self.raw, b.raw);
        Self::scale_down(hi, lo, c.raw, mode)
    }

    /// `a − b · trunc(a/b)`; since both operands share a scale, the scale
    /// cancels and this is exactly the native remainder of the raw words.
    #[inline]
    pub fn modulo(self, rhs: Self) -> Result<Self> {
        if rhs.is_zero() {
            return Err(Error::DivByZero);
        }
        Ok(Self::from_raw(self.raw % rhs.raw))
    }

    #[inline]
    pub fn int_mul(self, k: u64) -> Result<Self> {
        self.raw.checked_mul(k).map(Self::from_raw).ok_or(Error::Overflow)
    }

    #[inline]
    pub fn int_div(self, k: u64) -> Result<Self> {
        if k == 0 {
            return Err(Error::DivByZero);
        }
        Ok(Self::from_raw(self.raw / k))
    }

    #[inline]
    pub fn shift_left(self, n: u32) -> Self {
        Self::from_raw(word::shl64(self.raw, n))
    }

    #[inline]
    pub fn shift_right(self, n: u32) -> Self {
        Self::from_raw(word::shr64_logical(self.raw, n))
    }

    #[inline]
    pub fn lt(self, rhs: Self) -> bool {
        self < rhs
    }

    #[inline]
    pub fn lte(self, rhs: Self) -> bool {
        self <= rhs
    }

    #[inline]
    pub fn gt(self, rhs: Self) -> bool {
        self > rhs
    }

    #[inline]
    pub fn gte(self, rhs: Self) -> bool {
        self >= rhs
    }

    /// Loss-free widening to the 128-bit type: `raw · 10^16`.
    #[inline]
    pub fn widen(self) -> U128 {
        U128::from_raw(self.raw as u128 * Self::WIDEN_FACTOR)
    }

    /// Divide a 128-bit product `(hi, lo)` by the 64-bit divisor `d`,
    /// rounding per `mode`, and reporting overflow/underflow against
    /// this type's 64-bit range.
    fn scale_down(hi: u64, lo: u64, d: u64, mode: RoundingMode) -> Result<Self> {
        if hi >= d {
            return Err(Error::Overflow);
        }
        let (q, r) = word::div64(hi, lo, d);
        let round_up = word::should_round64(q, r, d, mode);
        if q == 0 && r != 0 && !round_up {
            return Err(Error::Underflow);
        }
        if round_up {
            return q.checked_add(1).map(Self::from_raw).ok_or(Error::Overflow);
        }
        Ok(Self::from_raw(q))
    }
}

impl PartialEq for U64 {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for U64 {}

impl PartialOrd for U64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for U64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_sub_roundtrip() {
        let a = U64::from_raw(150_000_000);
        let b = U64::from_raw(100_000_000);
        assert_eq!(a.sub(b).unwrap().raw, 50_000_000);
        assert_eq!(a.sub(b).unwrap().add(b).unwrap(), a);
    }

    #[test]
    fn add_overflow() {
        assert_eq!(U64::MAX.add(U64::from_raw(1)), Err(Error::Overflow));
    }

    #[test]
    fn sub_overflow_on_unsigned() {
        assert_eq!(U64::ZERO.sub(U64::ONE), Err(Error::Overflow));
    }

    #[test]
    fn mul_identity_and_zero() {
        let a = U64::from_raw(123_456_789);
        assert_eq!(a.mul(U64::ONE, RoundingMode::TowardZero).unwrap(), a);
        assert_eq!(U64::ZERO.mul(a, RoundingMode::TowardZero).unwrap(), U64::ZERO);
    }

    #[test]
    fn mul_half_times_half() {
        let half = U64::from_raw(50_000_000);
        let quarter = half.mul(half, RoundingMode::TowardZero).unwrap();
        assert_eq!(quarter.raw, 25_000_000);
    }

    #[test]
    fn mul_underflow() {
        // spec.md §8 names 0.0000002 * 0.2 as the underflow example, but
        // that product is 4e-8 = 4 ULP at scale 1e-8 and legitimately
        // rounds to a nonzero result — the spec's own parenthetical is
        // mis-scaled. 0.00000002 * 0.2 = 4e-9 is actually below one ULP.
        let a = U64::from_raw(2);
        let b = U64::from_raw(20_000_000);
        assert_eq!(a.mul(b, RoundingMode::TowardZero), Err(Error::Underflow));
    }

    #[test]
    fn div_by_zero() {
        assert_eq!(U64::ONE.div(U64::ZERO, RoundingMode::TowardZero), Err(Error::DivByZero));
    }

    #[test]
    fn fmd_max_times_one_div_one() {
        assert_eq!(
            U64::MAX.fmd(U64::from_raw(1), U64::from_raw(1), RoundingMode::TowardZero).unwrap(),
            U64::MAX
        );
    }

    #[test]
    fn modulo_basic() {
        let a = U64::from_raw(250_000_000);
        let b = U64::from_raw(100_000_000);
        assert_eq!(a.modulo(b).unwrap().raw, 50_000_000);
    }

    #[test]
    fn widen_is_exact() {
        let a = U64::from_raw(100_000_000); // 1.00000000
        let w = a.widen();
        assert_eq!(w.raw, 1_000_000_000_000_000_000_000_000);
    }

    #[test]
    fn ordering() {
        assert!(U64::ZERO.lt(U64::ONE));
        assert!(U64::ONE.gte(U64::ONE));
    }
}
