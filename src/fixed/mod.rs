//! L3: the four public scaled fixed-point types.
//!
//! Each type pairs a native integer (`u64`/`i64`/`u128`/`i128`) with a
//! fixed `SCALE`, and exposes a checked arithmetic surface rather than
//! raw wrapping `std::ops` traits: a deterministic ledger type has to
//! surface `Overflow`/`NegOverflow` rather than silently wrap, so
//! `Add`/`Sub`/`Mul`/`Div`/`Fmd` are plain methods returning
//! [`crate::error::Result`] instead of trait impls. Comparison is cheap
//! and total, so `Ord`/`PartialOrd`/`Eq` are implemented directly,
//! interpreting the top word as signed for the signed types.

pub mod i128;
pub mod i64;
pub mod u128;
pub mod u64;

pub use i128::S128;
pub use i64::S64;
pub use u128::U128;
pub use u64::U64;
