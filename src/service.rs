use std::{fmt, path::Path, sync::Arc, time::Duration};

use image::RgbaImage;
use image_recognition::{ImageCodec, Recognizer, TrainingSetGenerator, bitmap};
use log::{info, warn};
use neural_network::Network;
use parking_lot::Mutex;
use rand::Rng;
use tokio::task;

use crate::{config::AppConfig, error::ServiceErr};

pub type Result<T> = std::result::Result<T, ServiceErr>;

/// The outcome of identifying a single image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Identification<L> {
    Recognized(L),
    /// The network's output matches none of the labels.
    Unclassified,
    TimedOut,
}

impl<L: fmt::Display> fmt::Display for Identification<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recognized(label) => write!(f, "{label}"),
            Self::Unclassified => write!(f, "unclassified"),
            Self::TimedOut => write!(f, "timed out"),
        }
    }
}

/// Shares a trained recognizer between concurrent identifications.
///
/// Identifications run one at a time on the blocking pool. When one outlives the timeout the
/// caller gets `TimedOut` right away, but the abandoned identification still holds the
/// recognizer until it finishes.
pub struct RecognitionService<N, C, L> {
    recognizer: Arc<Mutex<Recognizer<N, C, L>>>,
    timeout: Option<Duration>,
}

impl<N, C, L> Clone for RecognitionService<N, C, L> {
    fn clone(&self) -> Self {
        Self {
            recognizer: Arc::clone(&self.recognizer),
            timeout: self.timeout,
        }
    }
}

impl<N, C, L> RecognitionService<N, C, L>
where
    N: Network + Send + 'static,
    C: ImageCodec + Send + 'static,
    L: Clone + PartialEq + fmt::Display + Send + 'static,
{
    /// Creates a new `RecognitionService` around an already prepared recognizer.
    ///
    /// # Arguments
    /// * `recognizer` - The recognizer every identification goes through.
    /// * `timeout` - How long a caller waits for an identification, forever if `None`.
    pub fn new(recognizer: Recognizer<N, C, L>, timeout: Option<Duration>) -> Self {
        Self {
            recognizer: Arc::new(Mutex::new(recognizer)),
            timeout,
        }
    }

    /// Trains `recognizer` with the corpus named in `config` and starts serving it.
    ///
    /// Training only happens when `config` asks for at least one iteration.
    ///
    /// # Arguments
    /// * `recognizer` - The recognizer to train and serve.
    /// * `config` - Where the corpus is, how long to train and the identification timeout.
    /// * `rng` - Used to shuffle the corpus.
    ///
    /// # Returns
    /// The service, or an error if the corpus can't be listed or training fails.
    pub fn start<R: Rng + ?Sized>(
        mut recognizer: Recognizer<N, C, L>,
        config: &AppConfig,
        rng: &mut R,
    ) -> Result<Self> {
        let iterations = config.training_iterations;

        if iterations > 0 {
            let set = TrainingSetGenerator::new(&config.training_dir).generate(&recognizer, rng)?;

            info!("training with {} pairs for {iterations} iterations", set.len());
            match recognizer.train_network(&set, iterations)? {
                Some(error) => info!("completed training with final error {error}"),
                None => {
                    warn!("network does not support supervised training, serving it untrained")
                }
            }
        } else {
            info!("skipping training");
        }

        Ok(Self::new(recognizer, config.identification_timeout()))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Identifies `image`, giving up once the timeout elapses.
    pub async fn identify(&self, image: RgbaImage) -> Result<Identification<L>> {
        let recognizer = Arc::clone(&self.recognizer);
        let identification = task::spawn_blocking(move || recognizer.lock().identify(&image));

        let label = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, identification).await {
                Ok(joined) => joined??,
                Err(_) => {
                    info!("identification timed out after {}ms", limit.as_millis());
                    return Ok(Identification::TimedOut);
                }
            },
            None => identification.await??,
        };

        Ok(match label {
            Some(label) => Identification::Recognized(label),
            None => Identification::Unclassified,
        })
    }

    /// Reads the image at `path` and identifies it.
    ///
    /// # Errors
    /// Returns an error if the file can't be read or decoded, or if identification fails.
    pub async fn identify_file<P: AsRef<Path>>(&self, path: P) -> Result<Identification<L>> {
        let path = path.as_ref().to_path_buf();
        let image = task::spawn_blocking(move || bitmap::open(path)).await??;
        self.identify(image).await
    }
}
