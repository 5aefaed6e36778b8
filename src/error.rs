use std::{error::Error, fmt, io};

use image_recognition::RecognitionErr;
use tokio::task::JoinError;

/// Failures loading the application configuration.
#[derive(Debug)]
pub enum ConfigErr {
    Io(io::Error),
    Json(serde_json::Error),
    /// A value that is present but can't be used, caught before building the network.
    Invalid(String),
}

impl fmt::Display for ConfigErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read config: {e}"),
            Self::Json(e) => write!(f, "invalid config: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl Error for ConfigErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for ConfigErr {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigErr {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Failures while training or identifying through the service.
#[derive(Debug)]
pub enum ServiceErr {
    Recognition(RecognitionErr),
    /// The blocking identification task panicked or was cancelled.
    Worker(JoinError),
}

impl fmt::Display for ServiceErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recognition(e) => write!(f, "recognition failed: {e}"),
            Self::Worker(e) => write!(f, "identification task failed: {e}"),
        }
    }
}

impl Error for ServiceErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Recognition(e) => Some(e),
            Self::Worker(e) => Some(e),
        }
    }
}

impl From<RecognitionErr> for ServiceErr {
    fn from(e: RecognitionErr) -> Self {
        Self::Recognition(e)
    }
}

impl From<JoinError> for ServiceErr {
    fn from(e: JoinError) -> Self {
        Self::Worker(e)
    }
}
