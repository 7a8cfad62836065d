//! Square root via Newton–Raphson with a from-below convergence guard.

use crate::error::Result;
use crate::fixed::{U128, U64};
use crate::kernel::{wide, word};
use crate::rounding::RoundingMode;

/// Safety bound on Newton–Raphson iterations. Quadratic convergence from
/// a bit-length-matched seed needs at most a handful of steps for either
/// width; this guards against an unexpected oscillation rather than
/// participating in the algorithm itself.
const MAX_ITERS: u32 = 128;

impl U64 {
    /// `sqrt(x)`, rounded per `mode`. `sqrt(0) = 0`.
    pub fn sqrt(self, mode: RoundingMode) -> Result<Self> {
        if self.is_zero() {
            return Ok(Self::ZERO);
        }
        let l = 64 - word::leading_zeros64(self.raw);
        let l_one = 64 - word::leading_zeros64(Self::SCALE);
        let target = (l + l_one) / 2;
        let mut e = Self::from_raw(1u64 << target.saturating_sub(1).min(63));

        for _ in 0..MAX_ITERS {
            let q = self.div(e, mode)?;
            let (lo, hi) = if e <= q { (e, q) } else { (q, e) };
            let diff = hi.sub(lo)?.int_div(2)?;
            if diff.is_zero() {
                return Ok(lo);
            }
            e = lo.add(diff)?;
        }
        Ok(e)
    }
}

impl U128 {
    /// `sqrt(x)`, rounded per `mode`. `sqrt(0) = 0`.
    pub fn sqrt(self, mode: RoundingMode) -> Result<Self> {
        if self.is_zero() {
            return Ok(Self::ZERO);
        }
        let l = 128 - wide::leading_zeros128(self.raw);
        let l_one = 128 - wide::leading_zeros128(Self::SCALE);
        let target = (l + l_one) / 2;
        let mut e = Self::from_raw(1u128 << target.saturating_sub(1).min(127));

        for _ in 0..MAX_ITERS {
            let q = self.div(e, mode)?;
            let (lo, hi) = if e <= q { (e, q) } else { (q, e) };
            let diff = hi.sub(lo)?.int_div(2)?;
            if diff.is_zero() {
                return Ok(lo);
            }
            e = lo.add(diff)?;
        }
        Ok(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqrt_four_is_two() {
        let four = U64::from_raw(4 * U64::SCALE);
        let two = U64::from_raw(2 * U64::SCALE);
        assert_eq!(four.sqrt(RoundingMode::NearestHalfEven).unwrap(), two);
    }

    #[test]
    fn sqrt_zero_is_zero() {
        assert_eq!(U64::ZERO.sqrt(RoundingMode::TowardZero).unwrap(), U64::ZERO);
    }

    #[test]
    fn sqrt_one_is_one() {
        assert_eq!(U64::ONE.sqrt(RoundingMode::TowardZero).unwrap(), U64::ONE);
    }

    #[test]
    fn sqrt_squares_back_within_a_ulp() {
        let x = U64::from_raw(12_345_678_900);
        let root = x.sqrt(RoundingMode::NearestHalfEven).unwrap();
        let squared = root.mul(root, RoundingMode::NearestHalfEven).unwrap();
        let diff = if squared.raw > x.raw { squared.raw - x.raw } else { x.raw - squared.raw };
        assert!(diff <= 1);
    }

    #[test]
    fn sqrt_u128_four_is_two() {
        let four = U128::from_raw(4 * U128::SCALE);
        let two = U128::from_raw(2 * U128::SCALE);
        assert_eq!(four.sqrt(RoundingMode::NearestHalfEven).unwrap(), two);
    }
}
