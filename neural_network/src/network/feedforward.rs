use log::{debug, trace};
use ndarray::Zip;
use rand::Rng;

use super::Network;
use crate::{
    NnErr, Result,
    layers::{Layers, Topology},
    learning::LearningRule,
    training::{Supervised, TrainingPair},
};

/// A fully connected network where information flows from the input layer to the output layer.
pub struct FeedForward<R: LearningRule> {
    rule: R,
    layers: Layers,
}

impl<R: LearningRule> FeedForward<R> {
    /// Creates a new `FeedForward` network.
    ///
    /// # Arguments
    /// * `rule` - The learning rule used to activate and teach the network.
    /// * `topology` - The widths of the layers and the initial weight range.
    /// * `rng` - A random number generator used to initialize the weights.
    ///
    /// # Returns
    /// A new `FeedForward` instance or an error if the topology is invalid.
    pub fn new<G: Rng + ?Sized>(rule: R, topology: &Topology, rng: &mut G) -> Result<Self> {
        let layers = Layers::new(topology, rng)?;
        Ok(Self { rule, layers })
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }
}

impl<R: LearningRule> Network for FeedForward<R> {
    fn layers(&self) -> &Layers {
        &self.layers
    }

    fn layers_mut(&mut self) -> &mut Layers {
        &mut self.layers
    }

    // A weight of exactly zero lets the source value through as if it were one.
    fn activate(&mut self) -> Result<()> {
        let (neurons, connections) = self.layers.split_mut();

        for i in 1..neurons.len() {
            let (sources, rest) = neurons.split_at_mut(i);
            let source = sources[i - 1].values();
            let destination = &mut rest[0];
            let weights = connections[i - 1].weights();

            if weights.dim() != (source.len(), destination.len()) {
                return Err(NnErr::SizeMismatch {
                    what: "connections",
                    got: weights.len(),
                    expected: source.len() * destination.len(),
                });
            }

            Zip::from(destination.values_mut())
                .and(weights.columns())
                .for_each(|node, column| {
                    let sum: f64 = source
                        .iter()
                        .zip(column)
                        .map(|(&value, &weight)| value * if weight == 0.0 { 1.0 } else { weight })
                        .sum();

                    *node = self.rule.lambda(sum);
                });

            trace!("layer {i} is now {}", rest[0]);
        }

        Ok(())
    }

    fn as_supervised(&mut self) -> Option<&mut dyn Supervised> {
        Some(self)
    }
}

impl<R: LearningRule> Supervised for FeedForward<R> {
    fn train_pair(&mut self, pair: &TrainingPair) -> Result<f64> {
        debug!(
            "training with pair '{}'",
            pair.name().unwrap_or("unnamed")
        );

        if pair.input().len() != self.input_size() {
            return Err(NnErr::SizeMismatch {
                what: "input layer",
                got: pair.input().len(),
                expected: self.input_size(),
            });
        }

        self.set_input(pair.input());
        self.activate()?;
        debug!("output layer is {}", self.output());
        debug!("desired output is {}", pair.target());

        let error = self.rule.teach(&mut self.layers, pair.target())?;
        trace!("error for the training pair was {error}");
        Ok(error)
    }
}
