use image::{Pixel, Rgba, RgbaImage};
use log::debug;
use neural_network::Neurons;

use crate::bitmap::{Bitmap, WHITE};

/// Turns images into network inputs, one node per pixel.
pub trait ImageCodec {
    /// Converts a packed ARGB pixel into a node value.
    fn pixel_to_scalar(&self, argb: u32) -> f64;

    /// Prepares a decoded image before it gets encoded.
    fn pre_process(&self, image: RgbaImage) -> RgbaImage {
        image
    }

    /// Encodes every pixel of `bitmap`, column by column.
    ///
    /// # Returns
    /// A layer of `width * height` nodes where node `x * height + y` holds pixel `(x, y)`.
    fn encode<B: Bitmap + ?Sized>(&self, bitmap: &B) -> Neurons {
        let (width, height) = (bitmap.width(), bitmap.height());
        let nodes = (0..width)
            .flat_map(|x| (0..height).map(move |y| (x, y)))
            .map(|(x, y)| self.pixel_to_scalar(bitmap.pixel_at(x, y)));

        Neurons::from_values(nodes)
    }
}

/// Encodes white pixels as `0.0` and anything else as `1.0`.
#[derive(Clone, Copy, Debug)]
pub struct BlackWhite {
    threshold: u8,
}

impl BlackWhite {
    pub const DEFAULT_THRESHOLD: u8 = 128;

    /// Creates a new `BlackWhite` codec.
    ///
    /// # Arguments
    /// * `threshold` - The luminance from which `pre_process` turns a pixel white.
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }
}

impl Default for BlackWhite {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

impl ImageCodec for BlackWhite {
    fn pixel_to_scalar(&self, argb: u32) -> f64 {
        if argb == WHITE { 0.0 } else { 1.0 }
    }

    /// Quantizes every pixel to opaque black or white by luminance.
    fn pre_process(&self, mut image: RgbaImage) -> RgbaImage {
        let mut whites = 0;
        for pixel in image.pixels_mut() {
            let [luma] = pixel.to_luma().0;
            *pixel = if luma >= self.threshold {
                whites += 1;
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            };
        }

        debug!("quantized image with {whites} white pixels");
        image
    }
}
