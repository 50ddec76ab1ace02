use alloc::string::String;
use core::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifyError {
    EmptySequence,
    NotRepresentable {
        index: usize,
        bits: u64,
    },
    SequenceMismatch {
        index: usize,
        claimed_bits: u64,
        computed_bits: u64,
    },
    WindowNotFound {
        window: usize,
        searched: u64,
    },
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySequence => write!(f, "observed sequence is empty"),
            Self::NotRepresentable { index, bits } => write!(
                f,
                "value at index {index} is not a generator output: {} (bits 0x{bits:016x})",
                f64::from_bits(*bits)
            ),
            Self::SequenceMismatch {
                index,
                claimed_bits,
                computed_bits,
            } => write!(
                f,
                "sequence mismatch at index {index}: claimed={}, computed={}",
                f64::from_bits(*claimed_bits),
                f64::from_bits(*computed_bits)
            ),
            Self::WindowNotFound { window, searched } => write!(
                f,
                "window of {window} values not found in the first {searched} offsets"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for VerifyError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseArithmeticError {
    pub value: String,
}

impl fmt::Display for ParseArithmeticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid arithmetic mode: {} (expected engine|unbounded)",
            self.value
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseArithmeticError {}
