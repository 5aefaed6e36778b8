mod connections;
mod neurons;
mod topology;

pub use connections::Connections;
pub use neurons::Neurons;
pub use topology::{Layers, Topology};
