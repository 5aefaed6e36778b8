mod backprop;
mod rule;

pub use backprop::BackPropagation;
pub use rule::LearningRule;
