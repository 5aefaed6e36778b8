use log::debug;
use rand::Rng;

use super::{Connections, Neurons};
use crate::{NnErr, Result};

/// The shape of a fully connected network.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Topology {
    pub input: usize,
    pub hidden: usize,
    pub hidden_layers: usize,
    pub output: usize,
    pub weight_range: f64,
}

impl Topology {
    /// Returns the width of every layer, input first and output last.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.hidden_layers + 2);
        sizes.push(self.input);
        sizes.extend(std::iter::repeat_n(self.hidden, self.hidden_layers));
        sizes.push(self.output);
        sizes
    }

    fn validate(&self) -> Result<()> {
        if self.input == 0 {
            return Err(NnErr::EmptyLayer { what: "input" });
        }
        if self.hidden_layers > 0 && self.hidden == 0 {
            return Err(NnErr::EmptyLayer { what: "hidden" });
        }
        if self.output == 0 {
            return Err(NnErr::EmptyLayer { what: "output" });
        }

        Ok(())
    }
}

/// The node layers of a network and the connections chaining them.
///
/// `connections[i]` always joins `neurons[i]` with `neurons[i + 1]`.
#[derive(Clone, Debug)]
pub struct Layers {
    neurons: Vec<Neurons>,
    connections: Vec<Connections>,
}

impl Layers {
    /// Creates the layers described by `topology`.
    ///
    /// A topology without hidden layers connects the input straight to the output.
    ///
    /// # Arguments
    /// * `topology` - The widths of the layers and the initial weight range.
    /// * `rng` - A random number generator used to initialize the weights.
    ///
    /// # Returns
    /// The new layers or an error if the topology is invalid.
    pub fn new<R: Rng + ?Sized>(topology: &Topology, rng: &mut R) -> Result<Self> {
        topology.validate()?;
        debug!(
            input = topology.input,
            hidden = topology.hidden,
            hidden_layers = topology.hidden_layers,
            output = topology.output;
            "creating network layers"
        );

        let sizes = topology.sizes();
        let neurons = sizes.iter().map(|&size| Neurons::new(size)).collect();
        let connections = sizes
            .windows(2)
            .map(|pair| Connections::new(pair[0], pair[1], topology.weight_range, &mut *rng))
            .collect::<Result<_>>()?;

        Ok(Self {
            neurons,
            connections,
        })
    }

    /// Returns the amount of node layers, always at least two.
    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    pub fn input(&self) -> &Neurons {
        &self.neurons[0]
    }

    pub fn input_mut(&mut self) -> &mut Neurons {
        &mut self.neurons[0]
    }

    pub fn output(&self) -> &Neurons {
        &self.neurons[self.neurons.len() - 1]
    }

    pub fn neurons(&self) -> &[Neurons] {
        &self.neurons
    }

    pub fn connections(&self) -> &[Connections] {
        &self.connections
    }

    pub fn connections_mut(&mut self) -> &mut [Connections] {
        &mut self.connections
    }

    /// Splits the layers so nodes and connections can be borrowed independently.
    pub fn split_mut(&mut self) -> (&mut [Neurons], &mut [Connections]) {
        (&mut self.neurons, &mut self.connections)
    }
}
