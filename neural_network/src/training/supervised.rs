use log::{debug, info};

use super::{TrainingPair, TrainingSet};
use crate::Result;

/// A network that can be trained with known input and output pairs.
pub trait Supervised {
    /// Trains the network on a single pair.
    ///
    /// # Returns
    /// The error reported by the learning rule after correcting the network.
    fn train_pair(&mut self, pair: &TrainingPair) -> Result<f64>;

    /// Trains the network on every pair of the set, in order.
    ///
    /// # Returns
    /// The sum of the errors of every pair.
    fn train_set(&mut self, set: &TrainingSet) -> Result<f64> {
        let mut error = 0.0;
        for pair in set {
            error += self.train_pair(pair)?;
        }

        debug!("error for the training set was {error}");
        Ok(error)
    }

    /// Trains the network on the whole set `iterations` times.
    ///
    /// # Returns
    /// The error of the last iteration only, `0.0` if there were none.
    fn train(&mut self, set: &TrainingSet, iterations: usize) -> Result<f64> {
        let mut last = 0.0;
        for i in 0..iterations {
            info!("training iteration {}/{iterations}", i + 1);
            last = self.train_set(set)?;
        }

        info!("final error of the training set after training: {last}");
        Ok(last)
    }
}
