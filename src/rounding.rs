//! The four rounding modes shared by every scale-changing operation.

/// How to resolve the fractional remainder left over by a scale-changing
/// division (`Mul`, `Div`, `Fmd`, and cross-width narrowing all take one
/// of these).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundingMode {
    /// Truncate: never round the quotient up.
    #[default]
    TowardZero,
    /// Round up whenever there is any nonzero remainder.
    AwayFromZero,
    /// Round to the nearest representable value; ties round away from zero.
    NearestHalfAway,
    /// Round to the nearest representable value; ties round to the even
    /// (last-bit-zero) quotient.
    NearestHalfEven,
}
