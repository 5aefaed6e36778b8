use std::fmt;

use ndarray::{Array1, ArrayView1, ArrayViewMut1};

/// A fixed length layer of node values.
///
/// The length is decided at construction and never changes, every write into the layer is
/// clipped to it.
#[derive(Clone, Debug, PartialEq)]
pub struct Neurons {
    nodes: Array1<f64>,
}

impl Neurons {
    /// Creates a new `Neurons` layer with every node set to `1.0`.
    ///
    /// # Arguments
    /// * `size` - The amount of nodes in the layer.
    ///
    /// # Returns
    /// A new `Neurons` instance.
    pub fn new(size: usize) -> Self {
        Self {
            nodes: Array1::ones(size),
        }
    }

    /// Creates a new `Neurons` layer holding exactly the given values.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self {
            nodes: values.into_iter().collect(),
        }
    }

    /// Creates a layer of `size` zeros with a single `1.0` at `index`.
    ///
    /// An `index` outside of the layer leaves it all zeros.
    pub fn one_hot(size: usize, index: usize) -> Self {
        let mut nodes = Array1::zeros(size);
        if let Some(node) = nodes.get_mut(index) {
            *node = 1.0;
        }

        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.nodes.view()
    }

    pub fn values_mut(&mut self) -> ArrayViewMut1<'_, f64> {
        self.nodes.view_mut()
    }

    /// Copies `values` into the layer position by position.
    ///
    /// Values past the end of the layer are dropped, and if `values` is shorter than the layer
    /// only the overlapping prefix is overwritten, the trailing nodes keep their previous values.
    ///
    /// # Arguments
    /// * `values` - The values to copy into the layer.
    pub fn set_values<'a, I>(&mut self, values: I)
    where
        I: IntoIterator<Item = &'a f64>,
    {
        self.nodes
            .iter_mut()
            .zip(values)
            .for_each(|(node, &value)| *node = value);
    }

    /// Returns a copy of this layer truncated or zero padded to `len` nodes.
    pub fn resized(&self, len: usize) -> Self {
        let mut nodes = Array1::zeros(len);
        nodes
            .iter_mut()
            .zip(&self.nodes)
            .for_each(|(node, &value)| *node = value);

        Self { nodes }
    }
}

impl From<Vec<f64>> for Neurons {
    fn from(value: Vec<f64>) -> Self {
        Self {
            nodes: Array1::from_vec(value),
        }
    }
}

impl fmt::Display for Neurons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.nodes)
    }
}
