//! Crate-level cross-cutting tests: algebraic invariants and concrete
//! worked examples, checked with `quickcheck` where the property holds
//! across arbitrary inputs and as plain `#[test]`s for the literal
//! scenarios and error-edge cases.

use quickcheck_macros::quickcheck;

use crate::consts::s64;
use crate::error::Error;
use crate::rounding::RoundingMode;
use crate::{S128, S64, U128, U64};

const MODE: RoundingMode = RoundingMode::NearestHalfEven;

// ---------------------------------------------------------------------
// Algebraic invariants
// ---------------------------------------------------------------------

#[quickcheck]
fn add_commutative_u64(a: u64, b: u64) -> bool {
    let (a, b) = (U64::from_raw(a), U64::from_raw(b));
    match (a.add(b), b.add(a)) {
        (Ok(x), Ok(y)) => x == y,
        (Err(_), Err(_)) => true,
        _ => false,
    }
}

#[quickcheck]
fn sub_undoes_add_when_no_overflow(a: u64, b: u64) -> bool {
    let (a, b) = (U64::from_raw(a), U64::from_raw(b));
    match a.add(b) {
        Ok(sum) => sum.sub(b).unwrap() == a,
        Err(_) => true,
    }
}

#[test]
fn neg_involution_except_min() {
    for raw in [1i64, -1, 42, -42, i64::MAX, i64::MIN + 1] {
        let x = S64::from_raw(raw);
        assert_eq!(x.neg().unwrap().neg().unwrap(), x);
    }
    assert_eq!(S64::MIN.neg(), Err(Error::Overflow));
}

#[quickcheck]
fn abs_is_nonnegative_and_sign_stable(raw: i64) -> bool {
    let x = S64::from_raw(raw);
    let (mag, neg) = x.abs();
    let (mag_of_neg, neg_of_neg) = match x.neg() {
        Ok(negated) => negated.abs(),
        Err(_) => return true, // x == MIN, no positive counterpart to compare against
    };
    mag == mag_of_neg && neg != neg_of_neg
}

#[quickcheck]
fn mul_sign_symmetry_u64(a: u64, b: u64) -> bool {
    let (sa, sb) = (S64::from_raw(a as i64), S64::from_raw(b as i64));
    let pp = sa.mul(sb, MODE);
    let nn = sa.neg().and_then(|na| sb.neg().and_then(|nb| na.mul(nb, MODE)));
    let pn = sa.mul(sb.neg().unwrap_or(S64::MIN), MODE);
    match (pp, nn) {
        (Ok(x), Ok(y)) => x == y || pn.is_err(),
        _ => true,
    }
}

#[test]
fn mul_identity_and_zero() {
    let a = U64::from_raw(123_456_789);
    assert_eq!(a.mul(U64::ONE, MODE).unwrap(), a);
    assert_eq!(a.div(U64::ONE, MODE).unwrap(), a);
    assert_eq!(U64::ZERO.mul(a, MODE).unwrap(), U64::ZERO);
}

#[quickcheck]
fn div_undoes_mul_within_a_ulp(a: u32, b: u32) -> bool {
    if b == 0 {
        return true;
    }
    let (a, b) = (U64::from_raw(a as u64), U64::from_raw(b as u64));
    match a.mul(b, MODE) {
        Ok(product) => match product.div(b, MODE) {
            Ok(back) => {
                let diff = if back.raw > a.raw { back.raw - a.raw } else { a.raw - back.raw };
                diff <= 1
            }
            Err(_) => true,
        },
        Err(_) => true,
    }
}

#[quickcheck]
fn sqrt_of_square_within_a_ulp(x: u32) -> bool {
    let x = U64::from_raw(x as u64);
    match x.mul(x, MODE) {
        Ok(squared) => match squared.sqrt(RoundingMode::NearestHalfEven) {
            Ok(root) => {
                let diff =
                    if root.raw > x.raw { root.raw - x.raw } else { x.raw - root.raw };
                diff <= 1
            }
            Err(_) => true,
        },
        Err(_) => true,
    }
}

#[quickcheck]
fn sin_cos_pythagorean_within_a_ulp(raw: i32) -> bool {
    let x = S64::from_raw(raw as i64);
    let s = x.sin();
    let c = x.cos();
    let sum = s
        .mul(s, MODE)
        .and_then(|s2| c.mul(c, MODE).and_then(|c2| s2.add(c2)));
    match sum {
        Ok(total) => {
            let diff = (total.raw - S64::ONE.raw).abs();
            diff <= 3
        }
        Err(_) => true,
    }
}

#[quickcheck]
fn sin_is_odd_cos_is_even(raw: i32) -> bool {
    let x = S64::from_raw(raw as i64);
    match x.neg() {
        Ok(neg_x) => x.sin().raw == -neg_x.sin().raw && x.cos().raw == neg_x.cos().raw,
        Err(_) => true,
    }
}

#[test]
fn sin_periodic_in_two_pi_within_a_ulp() {
    for raw in [0i64, 40_000_000, 150_000_000, -75_000_000] {
        let x = S64::from_raw(raw);
        let shifted = x.add(s64::TWO_PI).unwrap();
        let diff = (shifted.sin().raw - x.sin().raw).abs();
        assert!(diff <= 4);
    }
}

// ---------------------------------------------------------------------
// Concrete worked examples
// ---------------------------------------------------------------------

#[test]
fn scenario_add_one_plus_one() {
    let one = U64::from_raw(100_000_000);
    assert_eq!(one.add(one).unwrap().raw, 200_000_000);
}

#[test]
fn scenario_mul_half_times_half() {
    let half = U64::from_raw(50_000_000);
    assert_eq!(half.mul(half, MODE).unwrap().raw, 25_000_000);
}

#[test]
fn scenario_fmd_max_identity() {
    let one = U64::from_raw(1);
    assert_eq!(U64::MAX.fmd(one, one, MODE).unwrap(), U64::MAX);
}

#[test]
fn scenario_sqrt_four_is_two() {
    let four = U64::from_raw(400_000_000);
    let two = U64::from_raw(200_000_000);
    assert_eq!(four.sqrt(RoundingMode::NearestHalfEven).unwrap(), two);
}

#[test]
fn scenario_ln_of_e_is_near_one() {
    let e = U64::from_raw(271_828_183);
    let result = e.ln().unwrap();
    assert!((result.raw - S64::ONE.raw).abs() <= 1);
}

#[test]
fn scenario_sin_of_pi_is_zero_and_sin_half_pi_is_one() {
    assert!(s64::PI.sin().raw.abs() <= 2);
    let result = s64::HALF_PI.sin();
    assert!((result.raw - S64::ONE.raw).abs() <= 1);
}

// ---------------------------------------------------------------------
// Error-edge scenarios
// ---------------------------------------------------------------------

#[test]
fn scenario_u64_max_plus_one_ulp_overflows() {
    assert_eq!(U64::MAX.add(U64::from_raw(1)), Err(Error::Overflow));
}

#[test]
fn scenario_s64_min_minus_one_ulp_neg_overflows() {
    assert_eq!(S64::MIN.sub(S64::from_raw(1)), Err(Error::NegOverflow));
}

#[test]
fn scenario_tiny_product_underflows() {
    // spec.md §8's own example (0.0000002 * 0.2 = 4e-8) is actually 4 ULP
    // at scale 1e-8 and rounds to a representable nonzero value; see the
    // comment on fixed::u64::tests::mul_underflow. 0.00000002 * 0.2 = 4e-9
    // is the smallest-magnitude case that genuinely underflows.
    let a = U64::from_raw(2);
    let b = U64::from_raw(20_000_000);
    assert_eq!(a.mul(b, RoundingMode::TowardZero), Err(Error::Underflow));
}

#[test]
fn scenario_ln_of_zero_is_domain_error() {
    assert_eq!(U64::ZERO.ln(), Err(Error::Domain));
}

#[test]
fn scenario_div_by_zero() {
    assert_eq!(S64::ONE.div(S64::ZERO, MODE), Err(Error::DivByZero));
}

#[test]
fn scenario_pow_zero_to_negative_one_div_by_zero() {
    assert_eq!(U128::ZERO.pow(S128::NEG_ONE), Err(Error::DivByZero));
}
