//! L5: the transcendental engine — `sqrt`, `ln`, `exp`, `pow`, and
//! `sin`/`cos`/`tan` — implemented as inherent methods on the
//! [`crate::fixed`] types rather than free functions, so callers write
//! `x.ln()` the same way they write `x.add(y)`.
//!
//! Every routine here converts its public-scale input into the
//! [`crate::extra`] companion type, does its series/Newton iteration
//! there, and converts back with an explicit rounding mode.

pub mod exp;
pub mod ln;
pub mod pow;
pub mod sqrt;
pub mod trig;
