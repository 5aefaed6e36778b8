use std::path::Path;

use image::RgbaImage;

use crate::Result;

/// Packed ARGB value of an opaque white pixel.
pub const WHITE: u32 = 0xFFFF_FFFF;

/// Packed ARGB value of an opaque black pixel.
pub const BLACK: u32 = 0xFF00_0000;

/// A grid of pixels that can be encoded into a network input.
pub trait Bitmap {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Returns the pixel at column `x` and row `y` as a packed ARGB value.
    fn pixel_at(&self, x: u32, y: u32) -> u32;
}

impl Bitmap for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel_at(&self, x: u32, y: u32) -> u32 {
        let [r, g, b, a] = self.get_pixel(x, y).0;
        u32::from_be_bytes([a, r, g, b])
    }
}

/// Reads and decodes the image at `path`.
///
/// # Errors
/// Returns an error if the file cannot be read or is not a supported image.
pub fn open<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    Ok(image::open(path)?.to_rgba8())
}
