mod pair;
mod supervised;

pub use pair::{TrainingPair, TrainingSet};
pub use supervised::Supervised;
