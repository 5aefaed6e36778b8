mod feedforward;
mod network;

pub use feedforward::FeedForward;
pub use network::Network;
