use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use log::{info, warn};
use neural_network::Topology;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ConfigErr;

/// Environment variable holding the path of the JSON config file.
pub const CONFIG_ENV: &str = "RECOGNITION_CONFIG";

pub type Result<T> = std::result::Result<T, ConfigErr>;

/// The shape and learning parameters of the network.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    pub input_nodes: usize,
    pub hidden_nodes: usize,
    pub hidden_layers: usize,
    pub weight_range: f64,
    pub learning_rate: f64,
    /// Seeds the weight initialization, the OS provides one when missing.
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            input_nodes: 400,
            hidden_nodes: 40,
            hidden_layers: 1,
            weight_range: 1.0,
            learning_rate: 0.5,
            seed: None,
        }
    }
}

/// What the application recognizes and how it trains at startup.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub labels: Vec<String>,
    pub resize_image: bool,
    pub training_dir: PathBuf,
    /// `0` skips training.
    #[serde(deserialize_with = "lenient_iterations")]
    pub training_iterations: usize,
    #[serde(deserialize_with = "lenient_timeout")]
    pub identification_timeout_ms: Option<u64>,
}

impl AppConfig {
    pub fn identification_timeout(&self) -> Option<Duration> {
        self.identification_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            labels: ["ORION", "URSA_MAJOR", "CASSIOPEIA", "CYGNUS", "LEO"]
                .map(String::from)
                .to_vec(),
            resize_image: true,
            training_dir: PathBuf::from("training"),
            training_iterations: 100,
            identification_timeout_ms: None,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub app: AppConfig,
}

impl Config {
    /// Loads the config file named by `RECOGNITION_CONFIG`, or the defaults if it isn't set.
    pub fn from_env() -> Result<Self> {
        Self::load_optional(std::env::var_os(CONFIG_ENV))
    }

    /// Loads the config at `path` if there is one, otherwise returns the defaults.
    pub fn load_optional(path: Option<impl Into<OsString>>) -> Result<Self> {
        match path.map(Into::into) {
            Some(path) if !path.is_empty() => Self::load(PathBuf::from(path)),
            _ => {
                info!("no config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Reads and parses the JSON config file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file can't be read, isn't valid JSON or holds an unusable value.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        info!("loaded config from {}", path.as_ref().display());
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;

        let rate = config.network.learning_rate;
        if !(rate.is_finite() && rate > 0.0) {
            return Err(ConfigErr::Invalid(format!("learning_rate must be positive, got {rate}")));
        }

        Ok(config)
    }

    /// The network topology, with one output node per label.
    pub fn topology(&self) -> Topology {
        Topology {
            input: self.network.input_nodes,
            hidden: self.network.hidden_nodes,
            hidden_layers: self.network.hidden_layers,
            output: self.app.labels.len(),
            weight_range: self.network.weight_range,
        }
    }
}

/// Accepts a non-negative integer or a string holding one, anything else means no training.
fn lenient_iterations<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let iterations = match &value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    match iterations.map(usize::try_from) {
        Some(Ok(iterations)) => Ok(iterations),
        _ => {
            warn!("invalid training_iterations {value}, training will be skipped");
            Ok(0)
        }
    }
}

/// Accepts a positive amount of milliseconds or a string holding one. Missing, empty and zero
/// values disable the timeout.
fn lenient_timeout<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let millis = match &value {
        Value::Null => return Ok(None),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    match millis {
        Some(millis) if millis > 0 => Ok(Some(millis as u64)),
        Some(_) => Ok(None),
        None => {
            warn!("invalid identification_timeout_ms {value}, identifications won't time out");
            Ok(None)
        }
    }
}
