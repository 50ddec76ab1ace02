//! Transition and conversion constants - exact match to the engine's
//! `XorShift128PlusRNG`.
//!
//! None of these are tunable: changing any of them produces a different
//! stream than the engine.

// xorshift128+ shift triple (a, b, c)
pub const SHIFT_A: u32 = 23; // left
pub const SHIFT_B: u32 = 17; // logical right
pub const SHIFT_C: u32 = 26; // logical right

// 52 explicit mantissa bits + 1 implicit bit of an IEEE-754 double
pub const MANTISSA_BITS: u32 = 53;
pub const MANTISSA_MASK: u64 = (1u64 << MANTISSA_BITS) - 1;
pub const MANTISSA_SCALE: f64 = (1u64 << MANTISSA_BITS) as f64;
