use std::fmt;

use image::{RgbaImage, imageops::FilterType};
use log::debug;
use neural_network::{Network, Neurons, NnErr, TrainingSet};

use crate::{
    Result,
    codec::{ImageCodec, LabelCodec},
};

/// Identifies images with a network, going from pixels to labels.
///
/// The recognizer owns the network it drives and does no synchronization of its own.
pub struct Recognizer<N, C, L> {
    codec: C,
    network: N,
    labels: LabelCodec<L>,
    resize: bool,
}

impl<N, C, L> Recognizer<N, C, L>
where
    N: Network,
    C: ImageCodec,
    L: Clone + PartialEq + fmt::Display,
{
    /// Creates a new `Recognizer`.
    ///
    /// # Arguments
    /// * `codec` - Turns images into network inputs.
    /// * `network` - The network used to identify the images.
    /// * `labels` - Turns network outputs into labels, one output node per label.
    /// * `resize` - Whether images are scaled to fit the network's input layer.
    ///
    /// # Returns
    /// A new `Recognizer` or an error if the network's output layer doesn't have one node per
    /// label.
    pub fn new(codec: C, network: N, labels: LabelCodec<L>, resize: bool) -> Result<Self> {
        let outputs = network.output().len();
        if outputs != labels.len() {
            return Err(NnErr::SizeMismatch {
                what: "output layer",
                got: outputs,
                expected: labels.len(),
            }
            .into());
        }

        Ok(Self {
            codec,
            network,
            labels,
            resize,
        })
    }

    /// Encodes `image` into a network input.
    ///
    /// When resizing, the image is first scaled, keeping its aspect ratio, so that its longest
    /// side matches the largest square that fits the input layer. The encoded layer is then zero
    /// padded to the input layer's exact size. Otherwise the image is encoded at its own size.
    pub fn input_for(&self, image: &RgbaImage) -> Neurons {
        if !self.resize {
            return self.codec.encode(&self.codec.pre_process(image.clone()));
        }

        let size = self.network.input_size();
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Neurons::new(0).resized(size);
        }

        let side = (size as f64).sqrt() as u32;
        let longest = width.max(height) as f64;
        let fit = |d: u32| ((d as f64 * side as f64 / longest).round() as u32).max(1);
        let scaled = image::imageops::resize(image, fit(width), fit(height), FilterType::Triangle);

        self.codec
            .encode(&self.codec.pre_process(scaled))
            .resized(size)
    }

    /// Identifies `image`.
    ///
    /// # Returns
    /// The label the network recognizes, `None` if it recognizes none.
    pub fn identify(&mut self, image: &RgbaImage) -> Result<Option<L>> {
        let input = self.input_for(image);
        self.classify(&input)
    }

    /// Activates the network with an already encoded input and decodes its output.
    pub fn classify(&mut self, input: &Neurons) -> Result<Option<L>> {
        self.network.set_input(input);
        self.network.activate()?;

        let label = self.labels.decode(self.network.output()).cloned();
        match &label {
            Some(label) => debug!("identified {label}"),
            None => debug!("no classification for output {}", self.network.output()),
        }

        Ok(label)
    }

    /// Trains the network with `set` if it supports supervised training.
    ///
    /// # Returns
    /// The error of the last iteration, or `None` if the network can't be trained this way.
    pub fn train_network(&mut self, set: &TrainingSet, iterations: usize) -> Result<Option<f64>> {
        let Some(network) = self.network.as_supervised() else {
            debug!("network does not support supervised training");
            return Ok(None);
        };

        Ok(Some(network.train(set, iterations)?))
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    pub fn labels(&self) -> &LabelCodec<L> {
        &self.labels
    }

    pub fn resizes(&self) -> bool {
        self.resize
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;
    use neural_network::{BackPropagation, FeedForward, Layers, Topology, TrainingPair};
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{RecognitionErr, codec::BlackWhite};

    const LABELS: [&str; 2] = ["ORION", "LYRA"];

    fn topology(input: usize) -> Topology {
        Topology {
            input,
            hidden: 6,
            hidden_layers: 1,
            output: LABELS.len(),
            weight_range: 1.0,
        }
    }

    fn recognizer(
        input: usize,
        resize: bool,
    ) -> Recognizer<FeedForward<BackPropagation>, BlackWhite, &'static str> {
        let mut rng = StdRng::seed_from_u64(42);
        let network = FeedForward::new(BackPropagation::new(0.5), &topology(input), &mut rng)
            .unwrap();
        let labels = LabelCodec::new(LABELS).unwrap();
        Recognizer::new(BlackWhite::default(), network, labels, resize).unwrap()
    }

    fn checkerboard(side: u32) -> RgbaImage {
        RgbaImage::from_fn(side, side, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        })
    }

    #[test]
    fn oversized_input_is_truncated_without_resizing() {
        let mut recognizer = recognizer(4, false);
        let image = checkerboard(3);
        let encoded = recognizer.input_for(&image);
        assert_eq!(encoded.len(), 9);

        recognizer.identify(&image).unwrap();

        let input = recognizer.network().layers().input();
        assert_eq!(input, &encoded.resized(4));
    }

    #[test]
    fn undersized_input_keeps_previous_values_without_resizing() {
        let mut recognizer = recognizer(9, false);
        recognizer.classify(&Neurons::from(vec![0.5; 9])).unwrap();

        recognizer.identify(&checkerboard(2)).unwrap();

        let input = recognizer.network().layers().input().values().to_vec();
        assert_eq!(input[..4].to_vec(), vec![1.0, 0.0, 0.0, 1.0]);
        assert!(input[4..].iter().all(|&v| v == 0.5));
    }

    #[test]
    fn resizing_fits_the_input_layer() {
        let recognizer = recognizer(16, true);
        let encoded = recognizer.input_for(&checkerboard(8));
        assert_eq!(encoded.len(), 16);
    }

    #[test]
    fn resizing_pads_non_square_inputs() {
        let recognizer = recognizer(10, true);
        let encoded = recognizer.input_for(&checkerboard(6));
        assert_eq!(encoded.len(), 10);
        assert!(encoded.values().iter().skip(9).all(|&v| v == 0.0));
    }

    #[test]
    fn resizing_keeps_the_aspect_ratio() {
        let recognizer = recognizer(16, true);
        let wide = RgbaImage::from_pixel(8, 4, Rgba([0, 0, 0, 255]));

        let encoded = recognizer.input_for(&wide).values().to_vec();
        assert_eq!(encoded.len(), 16);
        assert_eq!(encoded[..8].to_vec(), vec![1.0; 8]);
        assert_eq!(encoded[8..].to_vec(), vec![0.0; 8]);
    }

    #[test]
    fn resizing_an_empty_image_gives_a_blank_input() {
        let recognizer = recognizer(16, true);
        let encoded = recognizer.input_for(&RgbaImage::new(0, 3));
        assert_eq!(encoded, Neurons::from(vec![0.0; 16]));
    }

    #[test]
    fn trained_recognizer_identifies_its_patterns() {
        let mut recognizer = recognizer(4, false);
        let orion = Neurons::from(vec![1.0, 1.0, 0.0, 0.0]);
        let lyra = Neurons::from(vec![0.0, 0.0, 1.0, 1.0]);

        let set: TrainingSet = [
            TrainingPair::named("ORION", orion.clone(), Neurons::one_hot(2, 0)),
            TrainingPair::named("LYRA", lyra.clone(), Neurons::one_hot(2, 1)),
        ]
        .into_iter()
        .collect();

        let error = recognizer.train_network(&set, 500).unwrap();
        assert!(error.is_some());

        assert_eq!(recognizer.classify(&orion).unwrap(), Some("ORION"));
        assert_eq!(recognizer.classify(&lyra).unwrap(), Some("LYRA"));
    }

    struct Frozen {
        layers: Layers,
    }

    impl Network for Frozen {
        fn layers(&self) -> &Layers {
            &self.layers
        }

        fn layers_mut(&mut self) -> &mut Layers {
            &mut self.layers
        }

        fn activate(&mut self) -> neural_network::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn unsupervised_networks_are_not_trained() {
        let mut rng = StdRng::seed_from_u64(42);
        let network = Frozen {
            layers: Layers::new(&topology(4), &mut rng).unwrap(),
        };
        let labels = LabelCodec::new(LABELS).unwrap();
        let mut recognizer = Recognizer::new(BlackWhite::default(), network, labels, false).unwrap();

        let trained = recognizer.train_network(&TrainingSet::new(), 10).unwrap();
        assert_eq!(trained, None);
    }

    #[test]
    fn output_layer_must_match_the_labels() {
        let mut rng = StdRng::seed_from_u64(42);
        let topology = Topology {
            output: 3,
            ..topology(4)
        };
        let network = FeedForward::new(BackPropagation::new(0.5), &topology, &mut rng).unwrap();
        let labels = LabelCodec::new(LABELS).unwrap();

        let err = Recognizer::new(BlackWhite::default(), network, labels, false)
            .err()
            .unwrap();
        assert!(matches!(err, RecognitionErr::Network(NnErr::SizeMismatch { .. })));
    }
}
