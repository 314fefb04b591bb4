//! Turn-level strategy: posture classification and skip decisions.
//!
//! Before any cards are played or attacks are ordered, the engine decides
//! how it wants the turn to feel. [`PostureClassifier`] buckets the board
//! into [`Posture::Aggro`] or [`Posture::Defensive`]; the directors weight
//! their choices accordingly. [`SkipAdvisor`] may then recommend holding
//! the attack entirely when sitting on a won board is safer than trading.
//!
//! Both are stateless between cycles; each decision starts from a fresh
//! snapshot and its own RNG stream.

mod posture;
mod skip;

pub use posture::{Posture, PostureClassifier};
pub use skip::SkipAdvisor;

/// Why a phase driver took no action this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The host was not ready to be inspected.
    NotReady,
    /// Called outside the phase this driver acts in.
    WrongPhase,
    /// The host reports a different active side.
    NotOurTurn,
    /// Nothing playable or no attacker available.
    NothingToDo,
    /// The advisor chose to hold a winning position.
    Declined,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            SkipReason::NotReady => "board not ready",
            SkipReason::WrongPhase => "wrong phase",
            SkipReason::NotOurTurn => "not our turn",
            SkipReason::NothingToDo => "nothing to do",
            SkipReason::Declined => "declined",
        };
        write!(f, "{text}")
    }
}
