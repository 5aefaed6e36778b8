use std::fmt;

use log::debug;
use neural_network::Neurons;

use crate::{RecognitionErr, Result};

/// Maps a closed, ordered set of labels to one hot layers and back.
///
/// The position of a label in the set is the output node that stands for it, so the order must
/// stay the same between the network being trained and being used.
#[derive(Clone, Debug)]
pub struct LabelCodec<L> {
    labels: Vec<L>,
    templates: Vec<Neurons>,
}

impl<L: Clone + PartialEq + fmt::Display> LabelCodec<L> {
    /// Creates a new `LabelCodec`.
    ///
    /// # Arguments
    /// * `labels` - Every possible label, in output node order.
    ///
    /// # Returns
    /// A new `LabelCodec` or an error if there are no labels or one of them is repeated.
    pub fn new<I>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = L>,
    {
        let mut unique: Vec<L> = Vec::new();
        for label in labels {
            if unique.contains(&label) {
                return Err(RecognitionErr::DuplicateLabel(label.to_string()));
            }
            unique.push(label);
        }

        if unique.is_empty() {
            return Err(RecognitionErr::NoLabels);
        }

        let n = unique.len();
        let templates = (0..n).map(|i| Neurons::one_hot(n, i)).collect();

        Ok(Self {
            labels: unique,
            templates,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    pub fn index_of(&self, label: &L) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Returns the output layer the network should produce for `label`.
    pub fn template(&self, label: &L) -> Option<&Neurons> {
        self.index_of(label).map(|i| &self.templates[i])
    }

    /// Finds the label that best matches a network output.
    ///
    /// Every node is rounded to the nearest integer and the nodes that round to one are the
    /// candidates. The candidate whose raw value is the closest to one wins, ties go to the last
    /// one found.
    ///
    /// # Returns
    /// The matching label, or `None` if no node rounds to one.
    pub fn decode(&self, output: &Neurons) -> Option<&L> {
        let values = output.values();
        let normalized = values.mapv(round_half_up);

        let (index, rank) = normalized
            .iter()
            .zip(values)
            .enumerate()
            .filter(|(_, (rounded, _))| **rounded == 1.0)
            .map(|(i, (_, &value))| (i, 1.0 - value))
            .fold(None, |best: Option<(usize, f64)>, (i, rank)| match best {
                Some((_, best_rank)) if best_rank < rank => best,
                _ => Some((i, rank)),
            })?;

        debug!("best candidate is node {index} with value {}", 1.0 - rank);
        let candidate = Neurons::one_hot(self.len(), index);
        self.labels
            .iter()
            .zip(&self.templates)
            .find(|(_, template)| **template == candidate)
            .map(|(label, _)| label)
    }
}

/// Rounds halves up, towards positive infinity, also for negative values.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> LabelCodec<&'static str> {
        LabelCodec::new(["ORION", "CASSIOPEIA", "CYGNUS"]).unwrap()
    }

    #[test]
    fn templates_are_one_hot() {
        let codec = codec();
        assert_eq!(codec.template(&"ORION"), Some(&Neurons::from(vec![1., 0., 0.])));
        assert_eq!(codec.template(&"CYGNUS"), Some(&Neurons::from(vec![0., 0., 1.])));
        assert_eq!(codec.template(&"LYRA"), None);
    }

    #[test]
    fn templates_decode_to_their_label() {
        let codec = codec();
        for label in codec.labels() {
            let template = codec.template(label).unwrap();
            assert_eq!(codec.decode(template), Some(label));
        }
    }

    #[test]
    fn zeros_are_unclassified() {
        assert_eq!(codec().decode(&Neurons::from(vec![0., 0., 0.])), None);
        assert_eq!(codec().decode(&Neurons::from(vec![0.49, 0.2, 0.1])), None);
    }

    #[test]
    fn closest_to_one_wins() {
        let codec = codec();
        let output = Neurons::from(vec![0.9, 0.8, 0.1]);
        assert_eq!(codec.decode(&output), Some(&"ORION"));

        let output = Neurons::from(vec![0.6, 0.95, 0.7]);
        assert_eq!(codec.decode(&output), Some(&"CASSIOPEIA"));
    }

    #[test]
    fn ties_go_to_the_last_candidate() {
        let output = Neurons::from(vec![0.75, 0.0, 0.75]);
        assert_eq!(codec().decode(&output), Some(&"CYGNUS"));
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(round_half_up(0.5), 1.0);
        assert_eq!(round_half_up(-0.5), 0.0);
        assert_eq!(round_half_up(1.49), 1.0);

        let output = Neurons::from(vec![0.5, 0.0, 0.0]);
        assert_eq!(codec().decode(&output), Some(&"ORION"));
    }

    #[test]
    fn outputs_wider_than_the_labels_are_ignored() {
        let output = Neurons::from(vec![0.0, 0.0, 0.0, 1.0]);
        assert_eq!(codec().decode(&output), None);
    }

    #[test]
    fn invalid_label_sets_are_rejected() {
        assert!(matches!(
            LabelCodec::<&str>::new([]),
            Err(RecognitionErr::NoLabels)
        ));
        assert!(matches!(
            LabelCodec::new(["A", "B", "A"]),
            Err(RecognitionErr::DuplicateLabel(label)) if label == "A"
        ));
    }
}
