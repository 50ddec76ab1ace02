//! xorshift128+ - bit-exact reproduction of the engine's `Math.random`.
//!
//! Given the two 64-bit state words, this crate reproduces the exact stream
//! of raw outputs and doubles, can rewind it, and can check recorded doubles
//! against it. It makes no cryptographic claims whatsoever.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod constants;
pub mod error;
pub mod rng;
pub mod source;
pub mod verify;
pub mod wide;

pub use error::{ParseArithmeticError, VerifyError};
pub use rng::{mantissa_to_double, RngState, XorShift128Plus};
pub use source::{Arithmetic, DoubleSource};
pub use verify::{
    locate_window, mantissa_from_double, verify_sequence, verify_stream, SequenceJournal,
    VerifyRequest,
};
pub use wide::WideXorShift128Plus;
