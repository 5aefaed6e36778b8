use std::{
    error::Error,
    fmt::{self, Display},
};

use rand_distr::uniform::Error as UniformError;

/// The result type used in the entire neural network crate.
pub type Result<T> = std::result::Result<T, NnErr>;

/// The neural network crate's error type.
#[derive(Debug)]
pub enum NnErr {
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    EmptyLayer {
        what: &'static str,
    },
    InvalidWeightRange(f64),
    Distribution(UniformError),
}

impl Display for NnErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NnErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch in {what}, got {got} and expected {expected}"
            ),
            NnErr::EmptyLayer { what } => write!(f, "The {what} layer must have at least one node"),
            NnErr::InvalidWeightRange(range) => write!(
                f,
                "The initial weight range must be finite and non negative, got {range}"
            ),
            NnErr::Distribution(e) => write!(f, "Failed to build the weight distribution: {e}"),
        }
    }
}

impl Error for NnErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NnErr::Distribution(e) => Some(e),
            _ => None,
        }
    }
}

impl From<UniformError> for NnErr {
    fn from(value: UniformError) -> Self {
        Self::Distribution(value)
    }
}
