//! Unbounded-precision reference mode.
//!
//! Some published reference vectors for this generator were produced by a
//! host with arbitrary-precision integers, where `s1 << 23` and the final sum
//! never truncate. The state then widens by up to 23 bits per call and the
//! right shifts carry those high bits back down into the low 53, so the
//! doubles diverge from the engine after the first draw.
//!
//! `WideXorShift128Plus` reproduces those vectors. It is NOT what the engine
//! computes; use [`crate::XorShift128Plus`] for engine-exact output. Each call
//! costs time and memory proportional to the number of calls made so far.

use num_bigint::BigUint;

use crate::constants::{MANTISSA_MASK, SHIFT_A, SHIFT_B, SHIFT_C};
use crate::rng::mantissa_to_double;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WideXorShift128Plus {
    state: [BigUint; 2],
}

impl WideXorShift128Plus {
    pub fn new(initial_a: u64, initial_b: u64) -> Self {
        Self {
            state: [BigUint::from(initial_a), BigUint::from(initial_b)],
        }
    }

    /// Advance one step and return the full-width output.
    pub fn advance(&mut self) -> BigUint {
        let s0 = self.state[1].clone();
        let mut s1 = core::mem::replace(&mut self.state[0], s0.clone());
        let widened = &s1 << SHIFT_A;
        s1 ^= widened;
        let next = &s1 ^ &s0 ^ (&s1 >> SHIFT_B) ^ (&s0 >> SHIFT_C);
        let output = &next + &s0;
        self.state[1] = next;
        output
    }

    /// Same mantissa conversion as the engine: only the low 53 bits of the
    /// output are used.
    pub fn next_double(&mut self) -> f64 {
        mantissa_to_double(low_word(&self.advance()) & MANTISSA_MASK)
    }

    /// Bit length of the wider state word.
    pub fn state_bits(&self) -> u64 {
        self.state[0].bits().max(self.state[1].bits())
    }
}

fn low_word(value: &BigUint) -> u64 {
    value.iter_u64_digits().next().unwrap_or(0)
}
