//! Precomputed constants for the transcendental engine.
//!
//! With no reference binary available to copy byte-exact literals from,
//! every constant below is instead derived directly from its
//! mathematical definition at the precision each routine requires —
//! rounded to the nearest representable raw integer at the stated scale
//! — and is flagged in `DESIGN.md` as an open question should a
//! canonical reference vector set ever surface.

use crate::extra::{ExtraS128, ExtraS64, ExtraU128, ExtraU64};
use crate::fixed::{S128, S64};

/// Public-scale constants for the 64-bit types (scale `10^8`).
pub mod s64 {
    use super::*;

    pub const PI: S64 = S64::from_raw(314_159_265);
    pub const HALF_PI: S64 = S64::from_raw(157_079_633);
    pub const THREE_HALF_PI: S64 = S64::from_raw(471_238_898);
    pub const TWO_PI: S64 = S64::from_raw(628_318_531);
    pub const LN_2: S64 = S64::from_raw(69_314_718);

    /// `ln(U64::MAX as real)`: the largest input `exp` may take.
    pub const MAX_LN: S64 = S64::from_raw(2_594_073_881);
    /// `ln(1 / Scale64)`: the smallest input `exp` may take before the
    /// result underflows one ULP.
    pub const MIN_LN: S64 = S64::from_raw(-1_842_068_075);

    /// A multiple of `2π` with many trailing decimal zeros at this scale
    /// (100,000 full turns), used as the first-stage modulus in angle
    /// reduction for very large inputs.
    pub const TWO_PI_MULTIPLE: S64 = S64::from_raw(62_831_853_070_000);
}

/// Extra-precision constants for the 64-bit types, exposed per §6.2 as
/// raw bit patterns rather than through the crate-private `Extra*`
/// companion types: the companions themselves are internal plumbing
/// (§3.1 calls them "private"), but the byte values of the constants
/// they're built from are part of the required external interface.
pub mod extra_s64_raw {
    pub const PI: u64 = 658_839_731_666_114;
    pub const HALF_PI: u64 = 329_419_865_833_057;
    pub const THREE_HALF_PI: u64 = 988_259_597_499_171;
    pub const TWO_PI: u64 = 1_317_679_463_332_228;
    pub const LN_2: u64 = 145_363_499_600_565;

    /// Second-stage angle-reduction modulus (5,000 full turns at the
    /// extra-precision scale — the widest turn count that still fits the
    /// companion type's native `i64` width; 1,000,000 turns, which the
    /// 128-bit width affords, would overflow it by three orders of
    /// magnitude).
    pub const EXTRA_TWO_PI_MULTIPLE: u64 = 6_588_397_316_661_142_069;

    /// Largest `y` for which the Taylor series' first dropped term,
    /// `y³/6`, rounds to zero at the extra-precision scale — below this,
    /// `sin(y) == y` to the last bit.
    pub const IOTA: u64 = 6_414_119_143;
}

/// Extra-precision constants for the 64-bit types, in the internal
/// companion type, derived from [`extra_s64_raw`] so the two never drift
/// apart.
pub(crate) mod extra_s64 {
    use super::*;

    pub const PI: ExtraS64 = ExtraS64::from_raw(extra_s64_raw::PI as i64);
    pub const HALF_PI: ExtraS64 = ExtraS64::from_raw(extra_s64_raw::HALF_PI as i64);
    pub const THREE_HALF_PI: ExtraS64 = ExtraS64::from_raw(extra_s64_raw::THREE_HALF_PI as i64);
    pub const TWO_PI: ExtraS64 = ExtraS64::from_raw(extra_s64_raw::TWO_PI as i64);
    pub const LN_2: ExtraS64 = ExtraS64::from_raw(extra_s64_raw::LN_2 as i64);
    pub const EXTRA_TWO_PI_MULTIPLE: ExtraS64 =
        ExtraS64::from_raw(extra_s64_raw::EXTRA_TWO_PI_MULTIPLE as i64);
    pub const IOTA: ExtraU64 = ExtraU64::from_raw(extra_s64_raw::IOTA);
}

/// Public-scale constants for the 128-bit types (scale `10^24`).
pub mod s128 {
    use super::*;

    pub const PI: S128 = S128::from_raw(3_141_592_653_589_793_238_462_643);
    pub const HALF_PI: S128 = S128::from_raw(1_570_796_326_794_896_619_231_322);
    pub const THREE_HALF_PI: S128 = S128::from_raw(4_712_388_980_384_689_857_693_965);
    pub const TWO_PI: S128 = S128::from_raw(6_283_185_307_179_586_476_925_287);
    pub const LN_2: S128 = S128::from_raw(693_147_180_559_945_309_417_232);

    /// `ln(U128::MAX as real)`.
    pub const MAX_LN: S128 = S128::from_raw(33_460_796_879_815_903_188_973_917);
    /// `ln(1 / Scale128)`.
    pub const MIN_LN: S128 = S128::from_raw(-55_262_042_231_857_096_416_431_796);

    /// A multiple of `2π` with many trailing decimal zeros at this scale
    /// (100,000 full turns).
    pub const TWO_PI_MULTIPLE: S128 =
        S128::from_raw(628_318_530_718_000_000_000_000_000_000_000);
}

/// Extra-precision constants for the 128-bit types, exposed per §6.2 as
/// raw bit patterns (see [`extra_s64_raw`] for why these live outside
/// the private `Extra*` companion types).
pub mod extra_s128_raw {
    pub const PI: u128 = 6_588_397_316_661_142_069_628_409_496_531;
    pub const HALF_PI: u128 = 3_294_198_658_330_571_034_814_204_748_266;
    pub const THREE_HALF_PI: u128 = 9_882_595_974_991_713_104_442_614_244_797;
    pub const TWO_PI: u128 = 13_176_794_633_322_284_139_256_818_993_063;
    pub const LN_2: u128 = 1_453_634_996_005_650_425_534_967_177_980;

    /// Second-stage angle-reduction modulus (1,000,000 full turns at the
    /// extra-precision scale).
    pub const EXTRA_TWO_PI_MULTIPLE: u128 =
        13_176_794_633_322_280_000_000_000_000_000_000_000;

    /// Largest `y` for which `y³/6` rounds to zero at the extra-precision
    /// scale.
    pub const IOTA: u128 = 297_717_037_929_617_761_712;
}

/// Extra-precision constants for the 128-bit types, in the internal
/// companion type, derived from [`extra_s128_raw`] so the two never
/// drift apart.
pub(crate) mod extra_s128 {
    use super::*;

    pub const PI: ExtraS128 = ExtraS128::from_raw(extra_s128_raw::PI as i128);
    pub const HALF_PI: ExtraS128 = ExtraS128::from_raw(extra_s128_raw::HALF_PI as i128);
    pub const THREE_HALF_PI: ExtraS128 =
        ExtraS128::from_raw(extra_s128_raw::THREE_HALF_PI as i128);
    pub const TWO_PI: ExtraS128 = ExtraS128::from_raw(extra_s128_raw::TWO_PI as i128);
    pub const LN_2: ExtraS128 = ExtraS128::from_raw(extra_s128_raw::LN_2 as i128);
    pub const EXTRA_TWO_PI_MULTIPLE: ExtraS128 =
        ExtraS128::from_raw(extra_s128_raw::EXTRA_TWO_PI_MULTIPLE as i128);
    pub const IOTA: ExtraU128 = ExtraU128::from_raw(extra_s128_raw::IOTA);
}

/// `2π` stored with 125 fractional bits in a full `u128` — the
/// finest-precision modulus used for the third and final stage of angle
/// reduction for pathologically large inputs (`clamp_angle`'s cascaded
/// reduction widens to this representation, reduces, then shifts the
/// remainder right by 33 bits to land back at the extra-precision scale).
pub const TWO_PI_SHIFTED_33: u128 = 267_257_146_016_241_686_964_920_093_290_467_695_825;
/// Number of fractional bits `TWO_PI_SHIFTED_33` is expressed at.
pub const TWO_PI_SHIFTED_33_BITS: u32 = 125;
