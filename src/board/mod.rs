//! Board snapshots and the evaluator that produces them.

pub mod evaluator;
pub mod snapshot;

pub use evaluator::BoardEvaluator;
pub use snapshot::BoardSnapshot;
