//! Extra-precision companions of [`U64`]/[`S64`].

use crate::error::{Error, Result};
use crate::extra::EXTRA_BITS;
use crate::fixed::{S64, U64};
use crate::kernel::word;
use crate::rounding::RoundingMode;

/// `U64` scaled up by `2^EXTRA_BITS` extra binary fractional bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtraU64 {
    pub raw: u64,
}

impl ExtraU64 {
    pub const EXTRA_SCALE: u64 = U64::SCALE << EXTRA_BITS;
    pub const ONE: Self = Self { raw: Self::EXTRA_SCALE };
    pub const ZERO: Self = Self { raw: 0 };

    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self { raw }
    }

    /// `x << ExtraBits`: exact, assuming `x` is small enough that the
    /// shift does not overflow — always true for the pre-range-reduced
    /// arguments the transcendental engine feeds this conversion.
    #[inline]
    pub fn to_extra(x: U64) -> Self {
        Self::from_raw(x.raw << EXTRA_BITS)
    }

    #[inline]
    pub fn from_extra(self, mode: RoundingMode) -> Result<U64> {
        let d = 1u64 << EXTRA_BITS;
        let q = self.raw >> EXTRA_BITS;
        let r = self.raw & (d - 1);
        if word::should_round64(q, r, d, mode) {
            return q.checked_add(1).map(U64::from_raw).ok_or(Error::Overflow);
        }
        Ok(U64::from_raw(q))
    }

    /// `FMD(a, b, ExtraOne)`: the public `Mul` pattern, parameterized on
    /// the extra scale instead of `U64::SCALE`.
    #[inline]
    pub fn mul_extra(self, rhs: Self, mode: RoundingMode) -> Result<Self> {
        let (hi, lo) = word::mul64(self.raw, rhs.raw);
        Self::scale_down(hi, lo, Self::EXTRA_SCALE, mode)
    }

    /// `FMD(a, ExtraOne, b)`: the public `Div` pattern, parameterized on
    /// the extra scale.
    #[inline]
    pub fn div_extra(self, rhs: Self, mode: RoundingMode) -> Result<Self> {
        if rhs.raw == 0 {
            return Err(Error::DivByZero);
        }
        let (hi, lo) = word::mul64(self.raw, Self::EXTRA_SCALE);
        Self::scale_down(hi, lo, rhs.raw, mode)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.raw == 0
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

    fn scale_down(hi: u64, lo: u64, d: u64, mode: RoundingMode) -> Result<Self> {
        if hi >= d {
            return Err(Error::Overflow);
        }
        let (q, r) = word::div64(hi, lo, d);
        if word::should_round64(q, r, d, mode) {
            return q.checked_add(1).map(Self::from_raw).ok_or(Error::Overflow);
        }
        Ok(Self::from_raw(q))
    }
}

/// `S64` scaled up by `2^EXTRA_BITS` extra binary fractional bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtraS64 {
    pub raw: i64,
}

impl ExtraS64 {
    pub const ZERO: Self = Self { raw: 0 };
    pub const ONE: Self = Self { raw: ExtraU64::EXTRA_SCALE as i64 };

    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        Self { raw }
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.raw < 0
    }

    #[inline]
    pub fn to_extra(x: S64) -> Self {
        Self::from_raw(x.raw << EXTRA_BITS)
    }

    /// Rounds symmetrically around zero: the magnitude is shifted down
    /// and rounded exactly as the unsigned companion would, then the
    /// sign is reapplied — so `from_extra(-x) == -from_extra(x)`.
    #[inline]
    pub fn from_extra(self, mode: RoundingMode) -> Result<S64> {
        let neg = self.is_negative();
        let mag = ExtraU64::from_raw(self.raw.unsigned_abs());
        let rounded = mag.from_extra(mode)?;
        S64::apply_sign(rounded, neg)
    }

    #[inline]
    pub fn add(self, rhs: Self) -> Result<Self> {
        self.raw.checked_add(rhs.raw).map(Self::from_raw).ok_or_else(|| {
            if self.raw >= 0 { Error::Overflow } else { Error::NegOverflow }
        })
    }

    #[inline]
    pub fn sub(self, rhs: Self) -> Result<Self> {
        self.add(rhs.neg())
    }

    #[inline]
    pub fn neg(self) -> Self {
        Self::from_raw(-self.raw)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.raw == 0
    }

    #[inline]
    pub fn mul_extra(self, rhs: Self, mode: RoundingMode) -> Result<Self> {
        let neg = self.is_negative() ^ rhs.is_negative();
        let mag = ExtraU64::from_raw(self.raw.unsigned_abs())
            .mul_extra(ExtraU64::from_raw(rhs.raw.unsigned_abs()), mode)?;
        Ok(Self::from_raw(if neg { -(mag.raw as i64) } else { mag.raw as i64 }))
    }

    #[inline]
    pub fn div_extra(self, rhs: Self, mode: RoundingMode) -> Result<Self> {
        let neg = self.is_negative() ^ rhs.is_negative();
        let mag = ExtraU64::from_raw(self.raw.unsigned_abs())
            .div_extra(ExtraU64::from_raw(rhs.raw.unsigned_abs()), mode)?;
        Ok(Self::from_raw(if neg { -(mag.raw as i64) } else { mag.raw as i64 }))
    }

    #[inline]
    pub fn int_mul(self, k: i64) -> Result<Self> {
        self.raw.checked_mul(k).map(Self::from_raw).ok_or_else(|| {
            if (self.raw < 0) ^ (k < 0) { Error::NegOverflow } else { Error::Overflow }
        })
    }

    #[inline]
    pub fn int_div(self, k: i64) -> Result<Self> {
        if k == 0 {
            return Err(Error::DivByZero);
        }
        self.raw.checked_div(k).map(Self::from_raw).ok_or(Error::NegOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_exact() {
        let x = U64::from_raw(123_456_789);
        let extra = ExtraU64::to_extra(x);
        assert_eq!(extra.from_extra(RoundingMode::TowardZero).unwrap(), x);
    }

    #[test]
    fn signed_roundtrip_is_symmetric() {
        let x = S64::from_raw(-123_456_789);
        let extra = ExtraS64::to_extra(x);
        assert_eq!(extra.from_extra(RoundingMode::TowardZero).unwrap(), x);
    }
}
