use std::{error::Error, fmt, io};

use image::ImageError;
use neural_network::NnErr;

/// The image recognition crate's result type.
pub type Result<T> = std::result::Result<T, RecognitionErr>;

/// Failures while turning images into network inputs or network outputs into labels.
#[derive(Debug)]
pub enum RecognitionErr {
    Network(NnErr),
    Image(ImageError),
    Io(io::Error),
    NoLabels,
    DuplicateLabel(String),
}

impl fmt::Display for RecognitionErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecognitionErr::Network(e) => write!(f, "network error: {e}"),
            RecognitionErr::Image(e) => write!(f, "image error: {e}"),
            RecognitionErr::Io(e) => write!(f, "io error: {e}"),
            RecognitionErr::NoLabels => write!(f, "at least one label is required"),
            RecognitionErr::DuplicateLabel(label) => write!(f, "label {label} is repeated"),
        }
    }
}

impl Error for RecognitionErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RecognitionErr::Network(e) => Some(e),
            RecognitionErr::Image(e) => Some(e),
            RecognitionErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<NnErr> for RecognitionErr {
    fn from(value: NnErr) -> Self {
        Self::Network(value)
    }
}

impl From<ImageError> for RecognitionErr {
    fn from(value: ImageError) -> Self {
        Self::Image(value)
    }
}

impl From<io::Error> for RecognitionErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
