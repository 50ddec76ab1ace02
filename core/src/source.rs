use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseArithmeticError;
use crate::rng::XorShift128Plus;
use crate::wide::WideXorShift128Plus;

/// Anything that yields the generator's double stream.
pub trait DoubleSource {
    fn next_double(&mut self) -> f64;
}

impl DoubleSource for XorShift128Plus {
    fn next_double(&mut self) -> f64 {
        XorShift128Plus::next_double(self)
    }
}

impl DoubleSource for WideXorShift128Plus {
    fn next_double(&mut self) -> f64 {
        WideXorShift128Plus::next_double(self)
    }
}

impl<S: DoubleSource + ?Sized> DoubleSource for Box<S> {
    fn next_double(&mut self) -> f64 {
        (**self).next_double()
    }
}

/// Integer semantics used for the state words.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arithmetic {
    /// 64-bit wraparound, as the engine computes it.
    #[default]
    Engine,
    /// Arbitrary precision, see [`crate::wide`].
    Unbounded,
}

impl Arithmetic {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Engine => "engine",
            Self::Unbounded => "unbounded",
        }
    }

    pub fn generator(self, initial_a: u64, initial_b: u64) -> Box<dyn DoubleSource> {
        match self {
            Self::Engine => Box::new(XorShift128Plus::new(initial_a, initial_b)),
            Self::Unbounded => Box::new(WideXorShift128Plus::new(initial_a, initial_b)),
        }
    }
}

impl FromStr for Arithmetic {
    type Err = ParseArithmeticError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "engine" => Ok(Self::Engine),
            "unbounded" => Ok(Self::Unbounded),
            _ => Err(ParseArithmeticError {
                value: String::from(value),
            }),
        }
    }
}

impl fmt::Display for Arithmetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
