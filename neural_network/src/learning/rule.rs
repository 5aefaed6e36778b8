use crate::{
    Result,
    layers::{Layers, Neurons},
};

/// How a network squashes its node values and how it corrects its weights.
pub trait LearningRule {
    /// Teaches the layers towards `target` by correcting their weights.
    ///
    /// The layers are expected to have been activated with the input `target` corresponds to.
    ///
    /// # Arguments
    /// * `layers` - The layers of the network being taught.
    /// * `target` - The desired output layer.
    ///
    /// # Returns
    /// The error between the output layer and `target`, or an error if their sizes differ.
    fn teach(&self, layers: &mut Layers, target: &Neurons) -> Result<f64>;

    /// Returns the correction of a single node given its value and the value it should have.
    fn delta(&self, value: f64, target: f64) -> f64;

    /// Returns the total error between a layer and the layer it should be.
    fn error(&self, neurons: &Neurons, target: &Neurons) -> Result<f64>;

    /// The squashing function applied to every weighted sum.
    fn lambda(&self, x: f64) -> f64;

    /// The slope used to scale corrections.
    fn lambda_derivative(&self, x: f64) -> f64;
}
