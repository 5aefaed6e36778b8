mod image_codec;
mod label_codec;

pub use image_codec::{BlackWhite, ImageCodec};
pub use label_codec::LabelCodec;
