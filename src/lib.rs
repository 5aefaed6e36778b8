pub mod config;
pub mod error;
pub mod service;

pub use config::{AppConfig, Config, NetworkConfig};
pub use error::{ConfigErr, ServiceErr};
pub use service::{Identification, RecognitionService};
