pub mod bitmap;
pub mod codec;
pub mod corpus;
pub mod error;
pub mod recognizer;

pub use bitmap::Bitmap;
pub use codec::{BlackWhite, ImageCodec, LabelCodec};
pub use corpus::TrainingSetGenerator;
pub use error::{RecognitionErr, Result};
pub use recognizer::Recognizer;
