//! Error types for the decision engine.
//!
//! Two failure surfaces exist: reading the board (snapshots) and acting on
//! it (host calls). Snapshot failures are soft; the engine retries a few
//! times and then skips the cycle. Host failures abort only the action
//! that triggered them.

use thiserror::Error;

/// Why a board snapshot could not be taken.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// The host reported the battle as not ready to act on.
    #[error("battle not ready for inspection")]
    NotReady,
}

/// A host-reported failure while executing a decision.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("card {0} rejected: {1}")]
    CardRejected(u32, String),
    #[error("no open slot for summon")]
    BoardFull,
    #[error("attack rejected: {0}")]
    AttackRejected(String),
    #[error("host error: {0}")]
    Other(String),
}
