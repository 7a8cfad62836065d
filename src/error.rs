//! Error kinds shared by every fallible operation in the crate.

/// A fixed-point operation failed because the true mathematical result
/// cannot be represented exactly (or at all) by the target type.
///
/// Every arithmetic entry point in this crate returns `Result<T, Error>`
/// rather than panicking on division by zero or silently wrapping on
/// overflow — a replicated ledger cannot tolerate a panic or a silently
/// wrapped value, since either would desynchronize deterministic
/// execution across replicas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Error {
    /// The true result is positive and exceeds the type's maximum.
    #[error("result overflows the type's representable range")]
    Overflow,
    /// The true result is negative and falls below a signed type's minimum.
    #[error("result underflows the signed type's representable range")]
    NegOverflow,
    /// The true result is nonzero but smaller in magnitude than one ULP.
    #[error("nonzero result rounds to zero at this type's scale")]
    Underflow,
    /// The divisor was zero.
    #[error("division by zero")]
    DivByZero,
    /// The argument lies outside the function's mathematical domain.
    #[error("argument outside the function's domain")]
    Domain,
}

pub type Result<T> = core::result::Result<T, Error>;
