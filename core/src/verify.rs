use alloc::collections::VecDeque;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::constants::MANTISSA_SCALE;
use crate::error::VerifyError;
use crate::rng::{RngState, XorShift128Plus};
use crate::source::{Arithmetic, DoubleSource};
use crate::wide::WideXorShift128Plus;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub seed_a: u64,
    pub seed_b: u64,
    #[serde(default)]
    pub arithmetic: Arithmetic,
    /// Values drawn and discarded before `observed` starts.
    #[serde(default)]
    pub skip: u64,
    pub observed: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceJournal {
    pub seed_a: u64,
    pub seed_b: u64,
    pub arithmetic: Arithmetic,
    pub skip: u64,
    pub count: u64,
    /// Engine state after the last observed value. Unbounded state does not
    /// fit two words and is not reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_state: Option<RngState>,
}

/// Recover the 53-bit mantissa a double was built from.
///
/// `None` when the value could not have come out of `next_double`: outside
/// [0, 1), negative zero, NaN, or not a multiple of 2^-53.
pub fn mantissa_from_double(value: f64) -> Option<u64> {
    if value.is_sign_negative() || !(0.0..1.0).contains(&value) {
        return None;
    }
    let scaled = value * MANTISSA_SCALE;
    let mantissa = scaled as u64;
    if mantissa as f64 != scaled {
        return None;
    }
    Some(mantissa)
}

pub fn verify_sequence(request: &VerifyRequest) -> Result<SequenceJournal, VerifyError> {
    let (count, final_state) = match request.arithmetic {
        Arithmetic::Engine => {
            let mut rng = XorShift128Plus::new(request.seed_a, request.seed_b);
            let count = verify_stream(&mut rng, request.skip, &request.observed)?;
            (count, Some(rng.state()))
        }
        Arithmetic::Unbounded => {
            let mut rng = WideXorShift128Plus::new(request.seed_a, request.seed_b);
            let count = verify_stream(&mut rng, request.skip, &request.observed)?;
            (count, None)
        }
    };

    Ok(SequenceJournal {
        seed_a: request.seed_a,
        seed_b: request.seed_b,
        arithmetic: request.arithmetic,
        skip: request.skip,
        count,
        final_state,
    })
}

/// Compare `observed` bit-for-bit against `source` after discarding `skip`
/// values. Input checks run before the source is touched.
pub fn verify_stream<S: DoubleSource + ?Sized>(
    source: &mut S,
    skip: u64,
    observed: &[f64],
) -> Result<u64, VerifyError> {
    check_observed(observed)?;

    for _ in 0..skip {
        source.next_double();
    }

    for (index, claimed) in observed.iter().enumerate() {
        let computed = source.next_double();
        if computed.to_bits() != claimed.to_bits() {
            return Err(VerifyError::SequenceMismatch {
                index,
                claimed_bits: claimed.to_bits(),
                computed_bits: computed.to_bits(),
            });
        }
    }

    Ok(observed.len() as u64)
}

/// First offset in `0..=max_skip` at which `observed` appears in the stream
/// seeded with `(seed_a, seed_b)`.
pub fn locate_window(
    seed_a: u64,
    seed_b: u64,
    arithmetic: Arithmetic,
    observed: &[f64],
    max_skip: u64,
) -> Result<u64, VerifyError> {
    check_observed(observed)?;

    let mut source = arithmetic.generator(seed_a, seed_b);
    let wanted: Vec<u64> = observed.iter().map(|value| value.to_bits()).collect();
    let mut window: VecDeque<u64> = (0..wanted.len())
        .map(|_| source.next_double().to_bits())
        .collect();

    for offset in 0..=max_skip {
        if window.iter().eq(wanted.iter()) {
            return Ok(offset);
        }
        if offset == max_skip {
            break;
        }
        window.pop_front();
        window.push_back(source.next_double().to_bits());
    }

    Err(VerifyError::WindowNotFound {
        window: observed.len(),
        searched: max_skip.saturating_add(1),
    })
}

fn check_observed(observed: &[f64]) -> Result<(), VerifyError> {
    if observed.is_empty() {
        return Err(VerifyError::EmptySequence);
    }
    for (index, value) in observed.iter().enumerate() {
        if mantissa_from_double(*value).is_none() {
            return Err(VerifyError::NotRepresentable {
                index,
                bits: value.to_bits(),
            });
        }
    }
    Ok(())
}
