//! Xorshift128+ PRNG - identical output to the engine's `Math.random`.
//!
//! Algorithm:
//!   s1 = state[0]; s0 = state[1]; state[0] = s0;
//!   s1 ^= s1 << 23;
//!   state[1] = s1 ^ s0 ^ (s1 >> 17) ^ (s0 >> 26);
//!   return state[1] + s0;
//!
//! The engine does this on `uint64_t`; Rust `u64` shifts are logical and the
//! final sum uses `wrapping_add`, so every step truncates exactly like C++.
//!
//! Not a CSPRNG. The full state is recoverable from its outputs.

use core::iter;

use serde::{Deserialize, Serialize};

use crate::constants::{MANTISSA_MASK, MANTISSA_SCALE, SHIFT_A, SHIFT_B, SHIFT_C};

/// Snapshot of the two state words, in engine order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RngState {
    pub s0: u64,
    pub s1: u64,
}

impl From<(u64, u64)> for RngState {
    fn from(value: (u64, u64)) -> Self {
        Self {
            s0: value.0,
            s1: value.1,
        }
    }
}

impl From<RngState> for (u64, u64) {
    fn from(state: RngState) -> Self {
        (state.s0, state.s1)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct XorShift128Plus {
    state: [u64; 2],
}

impl XorShift128Plus {
    /// Seeds are taken verbatim. All-zero is accepted and yields a stream of
    /// zeros, same as the engine.
    pub fn new(initial_a: u64, initial_b: u64) -> Self {
        Self {
            state: [initial_a, initial_b],
        }
    }

    pub fn from_state(state: RngState) -> Self {
        Self::new(state.s0, state.s1)
    }

    pub fn state(&self) -> RngState {
        RngState {
            s0: self.state[0],
            s1: self.state[1],
        }
    }

    /// Advance one step and return the raw 64-bit output.
    #[inline]
    pub fn advance(&mut self) -> u64 {
        let mut s1 = self.state[0];
        let s0 = self.state[1];
        self.state[0] = s0;
        s1 ^= s1 << SHIFT_A;
        self.state[1] = s1 ^ s0 ^ (s1 >> SHIFT_B) ^ (s0 >> SHIFT_C);
        self.state[1].wrapping_add(s0)
    }

    /// Next double in [0, 1), built from the low 53 bits of `advance`.
    #[inline]
    pub fn next_double(&mut self) -> f64 {
        mantissa_to_double(self.advance() & MANTISSA_MASK)
    }

    /// Undo one `advance`.
    ///
    /// Returns the raw value the restored state produces next, i.e. the value
    /// the undone `advance` returned. `advance` after `step_back` yields it
    /// again.
    pub fn step_back(&mut self) -> u64 {
        let [s0, next] = self.state;
        let produced = next.wrapping_add(s0);

        let s1 = undo_left_xorshift(undo_right_xorshift(next ^ s0 ^ (s0 >> SHIFT_C)));
        self.state = [s1, s0];
        produced
    }

    /// The double the most recent `next_double` call returned, rewinding the
    /// state past it.
    pub fn previous_double(&mut self) -> f64 {
        mantissa_to_double(self.step_back() & MANTISSA_MASK)
    }

    pub fn raws(&mut self) -> impl Iterator<Item = u64> + '_ {
        iter::from_fn(move || Some(self.advance()))
    }

    pub fn doubles(&mut self) -> impl Iterator<Item = f64> + '_ {
        iter::from_fn(move || Some(self.next_double()))
    }
}

/// `mantissa / 2^53` in double precision. `mantissa` must already be masked.
#[inline]
pub fn mantissa_to_double(mantissa: u64) -> f64 {
    mantissa as f64 / MANTISSA_SCALE
}

// Inverse of `x ^= x >> 17` on 64 bits.
#[inline]
fn undo_right_xorshift(value: u64) -> u64 {
    value ^ (value >> SHIFT_B) ^ (value >> (2 * SHIFT_B)) ^ (value >> (3 * SHIFT_B))
}

// Inverse of `x ^= x << 23` on 64 bits.
#[inline]
fn undo_left_xorshift(value: u64) -> u64 {
    value ^ (value << SHIFT_A) ^ (value << (2 * SHIFT_A))
}
