//! Match collection - turns a pattern run over a snapshot into ordered regions.

pub mod collector;
pub mod negation;

pub use collector::{MatchRegion, collect};
pub use negation::NegatedPattern;
