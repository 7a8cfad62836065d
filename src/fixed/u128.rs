//! Unsigned 128-bit fixed-point value at scale `10^24`.

use core::cmp::Ordering;

use crate::error::{Error, Result};
use crate::fixed::u64::U64;
use crate::kernel::wide;
use crate::rounding::RoundingMode;

/// `integer_value / SCALE` stored as a plain `u128`.
#[derive(Debug, Clone, Copy, Default)]
pub struct U128 {
    pub raw: u128,
}

impl U128 {
    pub const SCALE: u128 = 1_000_000_000_000_000_000_000_000;
    pub const ZERO: Self = Self { raw: 0 };
    pub const ONE: Self = Self { raw: Self::SCALE };
    pub const MIN: Self = Self::ZERO;
    pub const MAX: Self = Self { raw: u128::MAX };

    /// `U128 → U64` narrowing divisor: `Scale128 / Scale64 = 10^16`.
    const NARROW_FACTOR: u128 = 10_000_000_000_000_000;

    #[inline]
    pub const fn from_raw(raw: u128) -> Self {
        Self { raw }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.raw == 0
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

    /// Full 256-bit product divided by `SCALE`, with rounding.
    #[inline]
    pub fn mul(self, rhs: Self, mode: RoundingMode) -> Result<Self> {
        let (hi, lo) = wide::mul_wide(self.raw, rhs.raw);
        Self::scale_down(hi, lo, Self::SCALE, mode)
    }

    /// Numerator widened by `SCALE`, then divided by the denominator.
    #[inline]
    pub fn div(self, rhs: Self, mode: RoundingMode) -> Result<Self> {
        if rhs.is_zero() {
            return Err(Error::DivByZero);
        }
        let (hi, lo) = wide::mul_wide(self.raw, Self::SCALE);
        Self::scale_down(hi, lo, rhs.raw, mode)
    }

    /// `(a·b)/c` via a single widening multiply and a single rounded
    /// divide.
    #[inline]
    pub fn fmd(self, b: Self, c: Self, mode: RoundingMode) -> Result<Self> {
        if c.is_zero() {
            return Err(Error::DivByZero);
        }
        let (hi, lo) = wide::mul_wide(self.raw, b.raw);
        Self::scale_down(hi, lo, c.raw, mode)
    }

    /// `a − b · trunc(a/b)`; the scale cancels, so this is the native
    /// remainder of the raw words.
    #[inline]
    pub fn modulo(self, rhs: Self) -> Result<Self> {
        if rhs.is_zero() {
            return Err(Error::DivByZero);
        }
        Ok(Self::from_raw(self.raw % rhs.raw))
    }

    #[inline]
    pub fn int_mul(self, k: u128) -> Result<Self> {
        self.raw.checked_mul(k).map(Self::from_raw).ok_or(Error::Overflow)
    }

    #[inline]
    pub fn int_div(self, k: u128) -> Result<Self> {
        if k == 0 {
            return Err(Error::DivByZero);
        }
        Ok(Self::from_raw(self.raw / k))
    }

    #[inline]
    pub fn shift_left(self, n: u32) -> Self {
        Self::from_raw(wide::shl128(self.raw, n))
    }

    #[inline]
    pub fn shift_right(self, n: u32) -> Self {
        Self::from_raw(wide::shr128_logical(self.raw, n))
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

    /// Narrow to the 64-bit type: divide by `10^16`, rounding per `mode`
    /// and checking that the quotient fits in `u64`.
    #[inline]
    pub fn narrow(self, mode: RoundingMode) -> Result<U64> {
        let q = self.raw / Self::NARROW_FACTOR;
        let r = self.raw % Self::NARROW_FACTOR;
        let round_up = r != 0
            && match mode {
                RoundingMode::TowardZero => false,
                RoundingMode::AwayFromZero => true,
                RoundingMode::NearestHalfAway => 2 * r >= Self::NARROW_FACTOR,
                RoundingMode::NearestHalfEven => {
                    let doubled = 2 * r;
                    doubled > Self::NARROW_FACTOR
                        || (doubled == Self::NARROW_FACTOR && q & 1 == 1)
                }
            };
        if q == 0 && r != 0 && !round_up {
            return Err(Error::Underflow);
        }
        let q = if round_up { q + 1 } else { q };
        if q > u64::MAX as u128 {
            return Err(Error::Overflow);
        }
        Ok(U64::from_raw(q as u64))
    }

    /// Divide a 256-bit product `(hi, lo)` by the 128-bit divisor `d`,
    /// rounding per `mode`, and reporting overflow/underflow against
    /// this type's 128-bit range.
    fn scale_down(hi: u128, lo: u128, d: u128, mode: RoundingMode) -> Result<Self> {
        if hi >= d {
            return Err(Error::Overflow);
        }
        let (q, r) = wide::div_wide(hi, lo, d);
        let round_up = wide::should_round128(q, r, d, mode);
        if q == 0 && r != 0 && !round_up {
            return Err(Error::Underflow);
        }
        if round_up {
            return q.checked_add(1).map(Self::from_raw).ok_or(Error::Overflow);
        }
        Ok(Self::from_raw(q))
    }
}

impl PartialEq for U128 {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for U128 {}

impl PartialOrd for U128 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for U128 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_overflow() {
        assert_eq!(U128::MAX.add(U128::from_raw(1)), Err(Error::Overflow));
    }

    #[test]
    fn mul_identity() {
        let a = U128::from_raw(123_456_789_000_000_000_000_000);
        assert_eq!(a.mul(U128::ONE, RoundingMode::TowardZero).unwrap(), a);
    }

    #[test]
    fn fmd_max_times_one_div_one() {
        assert_eq!(
            U128::MAX.fmd(U128::from_raw(1), U128::from_raw(1), RoundingMode::TowardZero).unwrap(),
            U128::MAX
        );
    }

    #[test]
    fn narrow_exact_roundtrip() {
        let small = U64::from_raw(250_000_000);
        let wide = small.widen();
        assert_eq!(wide.narrow(RoundingMode::TowardZero).unwrap(), small);
    }

    #[test]
    fn narrow_overflow() {
        assert_eq!(U128::MAX.narrow(RoundingMode::TowardZero), Err(Error::Overflow));
    }
}
