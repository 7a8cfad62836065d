//! Deterministic, bit-exact decimal fixed-point arithmetic.
//!
//! Four public numeric types — [`U64`]/[`S64`] at scale `10^8` and
//! [`U128`]/[`S128`] at scale `10^24` — with a full arithmetic,
//! comparison, and transcendental surface (`sqrt`, `ln`, `exp`, `pow`,
//! `sin`, `cos`, `tan`) built from a portable multi-word integer kernel.
//!
//! Every operation is a pure function of its inputs: no floating-point
//! hardware, no thread-local state, no allocation, nothing that could
//! make the same bit inputs produce different bit outputs on two
//! platforms or two runs. That's the one property this crate exists to
//! guarantee — it is meant to sit underneath a replicated ledger or a
//! smart-contract VM, where non-determinism desynchronizes replicas.
//!
//! ```
//! use fixdet::{RoundingMode, U64};
//!
//! let a = U64::from_raw(150_000_000); // 1.50000000
//! let b = U64::from_raw(100_000_000); // 1.00000000
//! assert_eq!(a.add(b).unwrap().raw, 250_000_000);
//! assert_eq!(a.div(b, RoundingMode::NearestHalfEven).unwrap().raw, 150_000_000);
//! ```
//!
//! The five layers, bottom to top, live in [`kernel`] (word and wide
//! integer primitives), [`fixed`] (the four public types), [`extra`]
//! (internal higher-precision companions), [`consts`] (the precomputed
//! transcendental constants), and [`transcendental`] (the `sqrt`/`ln`/
//! `exp`/`pow`/`sin`/`cos`/`tan` methods on the fixed types).

pub mod consts;
pub mod error;
pub(crate) mod extra;
pub mod fixed;
pub mod kernel;
pub mod rounding;
pub mod transcendental;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use fixed::{S128, S64, U128, U64};
pub use rounding::RoundingMode;
