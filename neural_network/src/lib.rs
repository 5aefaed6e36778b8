pub mod error;
pub mod layers;
pub mod learning;
pub mod network;
pub mod training;

pub use error::{NnErr, Result};
pub use layers::{Connections, Layers, Neurons, Topology};
pub use learning::{BackPropagation, LearningRule};
pub use network::{FeedForward, Network};
pub use training::{Supervised, TrainingPair, TrainingSet};
