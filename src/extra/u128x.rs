//! Extra-precision companions of [`U128`]/[`S128`].

use crate::error::{Error, Result};
use crate::extra::EXTRA_BITS;
use crate::fixed::{S128, U128};
use crate::kernel::wide;
use crate::rounding::RoundingMode;

/// `U128` scaled up by `2^EXTRA_BITS` extra binary fractional bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtraU128 {
    pub raw: u128,
}

impl ExtraU128 {
    pub const EXTRA_SCALE: u128 = U128::SCALE << EXTRA_BITS;
    pub const ONE: Self = Self { raw: Self::EXTRA_SCALE };
    pub const ZERO: Self = Self { raw: 0 };

    #[inline]
    pub const fn from_raw(raw: u128) -> Self {
        Self { raw }
    }

    #[inline]
    pub fn to_extra(x: U128) -> Self {
        Self::from_raw(x.raw << EXTRA_BITS)
    }

    #[inline]
    pub fn from_extra(self, mode: RoundingMode) -> Result<U128> {
        let d = 1u128 << EXTRA_BITS;
        let q = self.raw >> EXTRA_BITS;
        let r = self.raw & (d - 1);
        if wide::should_round128(q, r, d, mode) {
            return q.checked_add(1).map(U128::from_raw).ok_or(Error::Overflow);
        }
        Ok(U128::from_raw(q))
    }

    #[inline]
    pub fn mul_extra(self, rhs: Self, mode: RoundingMode) -> Result<Self> {
        let (hi, lo) = wide::mul_wide(self.raw, rhs.raw);
        Self::scale_down(hi, lo, Self::EXTRA_SCALE, mode)
    }

    #[inline]
    pub fn div_extra(self, rhs: Self, mode: RoundingMode) -> Result<Self> {
        if rhs.raw == 0 {
            return Err(Error::DivByZero);
        }
        let (hi, lo) = wide::mul_wide(self.raw, Self::EXTRA_SCALE);
        Self::scale_down(hi, lo, rhs.raw, mode)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.raw == 0
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

    fn scale_down(hi: u128, lo: u128, d: u128, mode: RoundingMode) -> Result<Self> {
        if hi >= d {
            return Err(Error::Overflow);
        }
        let (q, r) = wide::div_wide(hi, lo, d);
        if wide::should_round128(q, r, d, mode) {
            return q.checked_add(1).map(Self::from_raw).ok_or(Error::Overflow);
        }
        Ok(Self::from_raw(q))
    }
}

/// `S128` scaled up by `2^EXTRA_BITS` extra binary fractional bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtraS128 {
    pub raw: i128,
}

impl ExtraS128 {
    pub const ZERO: Self = Self { raw: 0 };
    pub const ONE: Self = Self { raw: ExtraU128::EXTRA_SCALE as i128 };

    #[inline]
    pub const fn from_raw(raw: i128) -> Self {
        Self { raw }
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.raw < 0
    }

    #[inline]
    pub fn to_extra(x: S128) -> Self {
        Self::from_raw(x.raw << EXTRA_BITS)
    }

    /// Rounds symmetrically around zero, as [`ExtraS64::from_extra`] does.
    #[inline]
    pub fn from_extra(self, mode: RoundingMode) -> Result<S128> {
        let neg = self.is_negative();
        let mag = ExtraU128::from_raw(self.raw.unsigned_abs());
        let rounded = mag.from_extra(mode)?;
        S128::apply_sign(rounded, neg)
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
        let mag = ExtraU128::from_raw(self.raw.unsigned_abs())
            .mul_extra(ExtraU128::from_raw(rhs.raw.unsigned_abs()), mode)?;
        Ok(Self::from_raw(if neg { -(mag.raw as i128) } else { mag.raw as i128 }))
    }

    #[inline]
    pub fn div_extra(self, rhs: Self, mode: RoundingMode) -> Result<Self> {
        let neg = self.is_negative() ^ rhs.is_negative();
        let mag = ExtraU128::from_raw(self.raw.unsigned_abs())
            .div_extra(ExtraU128::from_raw(rhs.raw.unsigned_abs()), mode)?;
        Ok(Self::from_raw(if neg { -(mag.raw as i128) } else { mag.raw as i128 }))
    }

    #[inline]
    pub fn int_mul(self, k: i128) -> Result<Self> {
        self.raw.checked_mul(k).map(Self::from_raw).ok_or_else(|| {
            if (self.raw < 0) ^ (k < 0) { Error::NegOverflow } else { Error::Overflow }
        })
    }

    #[inline]
    pub fn int_div(self, k: i128) -> Result<Self> {
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
        let x = U128::from_raw(123_456_789_000_000_000_000_000);
        let extra = ExtraU128::to_extra(x);
        assert_eq!(extra.from_extra(RoundingMode::TowardZero).unwrap(), x);
    }
}
