use rand::{Rng, seq::SliceRandom};

use crate::layers::Neurons;

/// An input and the output a network should produce for it.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingPair {
    name: Option<String>,
    input: Neurons,
    target: Neurons,
}

impl TrainingPair {
    pub fn new(input: Neurons, target: Neurons) -> Self {
        Self {
            name: None,
            input,
            target,
        }
    }

    /// Creates a new `TrainingPair` tagged with the name of what it represents.
    pub fn named<S: Into<String>>(name: S, input: Neurons, target: Neurons) -> Self {
        Self {
            name: Some(name.into()),
            input,
            target,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn input(&self) -> &Neurons {
        &self.input
    }

    pub fn target(&self) -> &Neurons {
        &self.target
    }
}

/// The pairs a network is trained with, presented in order.
#[derive(Clone, Debug, Default)]
pub struct TrainingSet {
    pairs: Vec<TrainingPair>,
}

impl TrainingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pair: TrainingPair) {
        self.pairs.push(pair);
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrainingPair> {
        self.pairs.iter()
    }

    /// Shuffles the presentation order of the pairs.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pairs.shuffle(rng);
    }
}

impl FromIterator<TrainingPair> for TrainingSet {
    fn from_iter<I: IntoIterator<Item = TrainingPair>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl Extend<TrainingPair> for TrainingSet {
    fn extend<I: IntoIterator<Item = TrainingPair>>(&mut self, iter: I) {
        self.pairs.extend(iter);
    }
}

impl<'a> IntoIterator for &'a TrainingSet {
    type Item = &'a TrainingPair;
    type IntoIter = std::slice::Iter<'a, TrainingPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn pair(value: f64) -> TrainingPair {
        TrainingPair::new(Neurons::from(vec![value]), Neurons::from(vec![value]))
    }

    #[test]
    fn shuffle_keeps_every_pair() {
        let mut set: TrainingSet = (0..20).map(|i| pair(i as f64)).collect();
        set.shuffle(&mut StdRng::seed_from_u64(42));

        let mut values: Vec<f64> = set.iter().map(|p| p.input().values()[0]).collect();
        values.sort_by(f64::total_cmp);
        assert_eq!(values, (0..20).map(|i| i as f64).collect::<Vec<_>>());
    }

    #[test]
    fn named_pairs_keep_their_name() {
        let pair = TrainingPair::named("ORION", Neurons::new(1), Neurons::new(1));
        assert_eq!(pair.name(), Some("ORION"));
        assert_eq!(self::pair(0.).name(), None);
    }
}
