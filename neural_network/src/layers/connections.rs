use ndarray::{Array2, ArrayView2, ArrayViewMut2};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::{NnErr, Result};

/// The weights between two adjacent `Neurons` layers.
///
/// Row `k` holds the weights leaving node `k` of the source layer, column `j` the weights
/// arriving at node `j` of the destination layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Connections {
    weights: Array2<f64>,
}

impl Connections {
    /// Creates a new `Connections` matrix with random weights.
    ///
    /// Every weight is sampled independently from a uniform distribution over
    /// `[-range / 2, range / 2]`.
    ///
    /// # Arguments
    /// * `source` - The size of the source layer.
    /// * `destination` - The size of the destination layer.
    /// * `range` - The width of the interval centered at zero the weights are drawn from.
    /// * `rng` - A random number generator.
    ///
    /// # Returns
    /// A new `Connections` instance or an error if `range` is negative or not finite.
    pub fn new<R: Rng + ?Sized>(
        source: usize,
        destination: usize,
        range: f64,
        rng: &mut R,
    ) -> Result<Self> {
        if !range.is_finite() || range < 0.0 {
            return Err(NnErr::InvalidWeightRange(range));
        }

        let half = range / 2.0;
        let distribution = Uniform::new_inclusive(-half, half)?;
        let weights = Array2::from_shape_simple_fn((source, destination), || {
            distribution.sample(&mut *rng)
        });

        Ok(Self { weights })
    }

    pub fn from_weights(weights: Array2<f64>) -> Self {
        Self { weights }
    }

    /// Returns the `(source, destination)` dimensions of the matrix.
    pub fn dim(&self) -> (usize, usize) {
        self.weights.dim()
    }

    pub fn weights(&self) -> ArrayView2<'_, f64> {
        self.weights.view()
    }

    pub fn weights_mut(&mut self) -> ArrayViewMut2<'_, f64> {
        self.weights.view_mut()
    }

    /// Replaces the whole matrix, the dimensions are not checked.
    pub fn set_weights(&mut self, weights: Array2<f64>) {
        self.weights = weights;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn weights_stay_within_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let connections = Connections::new(5, 7, 0.5, &mut rng).unwrap();

        assert_eq!(connections.dim(), (5, 7));
        assert!(connections.weights().iter().all(|w| (-0.25..=0.25).contains(w)));
    }

    #[test]
    fn same_seed_same_weights() {
        let a = Connections::new(3, 3, 1.0, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = Connections::new(3, 3, 1.0, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_range_gives_zero_weights() {
        let mut rng = StdRng::seed_from_u64(42);
        let connections = Connections::new(2, 2, 0.0, &mut rng).unwrap();
        assert!(connections.weights().iter().all(|&w| w == 0.0));
    }

    #[test]
    fn negative_range_is_rejected() {
        let mut rng = StdRng::seed_from_u64(42);
        let err = Connections::new(2, 2, -1.0, &mut rng).unwrap_err();
        assert!(matches!(err, NnErr::InvalidWeightRange(_)));
    }

    #[test]
    fn set_weights_replaces_the_matrix() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut connections = Connections::new(2, 2, 1.0, &mut rng).unwrap();
        connections.set_weights(Array2::zeros((1, 3)));
        assert_eq!(connections.dim(), (1, 3));
    }
}
