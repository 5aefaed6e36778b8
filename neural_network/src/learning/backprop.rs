use log::trace;

use super::LearningRule;
use crate::{
    NnErr, Result,
    layers::{Layers, Neurons},
};

/// Online back propagation over a logistic sigmoid.
///
/// The slope used to scale the corrections is `1 - lambda(x)` rather than the derivative of the
/// sigmoid, trained networks depend on it so it must not be "fixed" in isolation.
#[derive(Clone, Copy, Debug)]
pub struct BackPropagation {
    learning_rate: f64,
}

impl BackPropagation {
    /// Creates a new `BackPropagation` learning rule.
    ///
    /// # Arguments
    /// * `learning_rate` - The factor applied to every weight correction and to the error.
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }
}

impl LearningRule for BackPropagation {
    fn teach(&self, layers: &mut Layers, target: &Neurons) -> Result<f64> {
        let output = layers.output();
        if output.len() != target.len() {
            return Err(NnErr::SizeMismatch {
                what: "target layer",
                got: target.len(),
                expected: output.len(),
            });
        }

        for (i, (pair, connections)) in layers
            .neurons()
            .windows(2)
            .zip(layers.connections())
            .enumerate()
        {
            let expected = (pair[0].len(), pair[1].len());
            if connections.dim() != expected {
                trace!("connections {i} don't fit their layers");
                return Err(NnErr::SizeMismatch {
                    what: "connections",
                    got: connections.dim().0 * connections.dim().1,
                    expected: expected.0 * expected.1,
                });
            }
        }

        let mut deltas: Vec<f64> = output
            .values()
            .iter()
            .zip(target.values())
            .map(|(&value, &target)| self.delta(value, target))
            .collect();

        let (neurons, connections) = layers.split_mut();

        // Every weight is read for the error before being corrected in the same pass.
        for i in (0..neurons.len() - 1).rev() {
            let nodes = &neurons[i];
            let mut weights = connections[i].weights_mut();

            let mut node_deltas = Vec::with_capacity(nodes.len());
            for (&node, mut row) in nodes.values().iter().zip(weights.rows_mut()) {
                let mut error = 0.0;
                for (weight, &delta) in row.iter_mut().zip(&deltas) {
                    error += delta * *weight;
                    *weight += self.learning_rate * (delta * node);
                }

                node_deltas.push(self.lambda_derivative(node) * error);
            }

            trace!("corrected connections {i}");
            deltas = node_deltas;
        }

        self.error(layers.output(), target)
    }

    fn delta(&self, value: f64, target: f64) -> f64 {
        self.lambda_derivative(value) * (target - value)
    }

    fn error(&self, neurons: &Neurons, target: &Neurons) -> Result<f64> {
        if neurons.len() != target.len() {
            return Err(NnErr::SizeMismatch {
                what: "target layer",
                got: target.len(),
                expected: neurons.len(),
            });
        }

        let error = neurons
            .values()
            .iter()
            .zip(target.values())
            .map(|(&actual, &target)| self.learning_rate * (target - actual).powi(2))
            .sum();

        Ok(error)
    }

    fn lambda(&self, x: f64) -> f64 {
        1. / (1. + (-x).exp())
    }

    fn lambda_derivative(&self, x: f64) -> f64 {
        1. - self.lambda(x)
    }
}
