use crate::{
    Result,
    layers::{Layers, Neurons},
    training::Supervised,
};

/// A network of node layers chained by weighted connections.
pub trait Network {
    fn layers(&self) -> &Layers;

    fn layers_mut(&mut self) -> &mut Layers;

    /// Propagates the values of the input layer through the rest of the layers.
    fn activate(&mut self) -> Result<()>;

    /// Copies `input` into the input layer.
    ///
    /// A shorter `input` only overwrites the matching prefix, the remaining input nodes keep the
    /// values they had, and a longer one is truncated.
    fn set_input(&mut self, input: &Neurons) {
        self.layers_mut().input_mut().set_values(input.values());
    }

    fn input_size(&self) -> usize {
        self.layers().input().len()
    }

    fn output(&self) -> &Neurons {
        self.layers().output()
    }

    /// Returns this network as a supervised one if it supports being trained with pairs.
    fn as_supervised(&mut self) -> Option<&mut dyn Supervised> {
        None
    }
}
