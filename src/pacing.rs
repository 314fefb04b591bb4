//! Pacing: where the engine yields time back to its host.
//!
//! A decision cycle is instantaneous from the engine's point of view, but
//! hosts usually want the opponent to act at a watchable rhythm. Rather
//! than sleeping internally, the engine announces every beat through a
//! [`Pacer`] and lets the host decide what a pause means: sleep, animate,
//! await a timer, or nothing at all.
//!
//! ## Example
//!
//! ```
//! use duelmind::pacing::{Pacer, Pause, PauseKind, RecordingPacer};
//! use std::time::Duration;
//!
//! let mut pacer = RecordingPacer::new();
//! pacer.pause(Pause::new(PauseKind::PhaseStart, Duration::from_millis(900)));
//! assert_eq!(pacer.pauses()[0].kind, PauseKind::PhaseStart);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Why the engine is pausing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauseKind {
    /// A decision cycle is beginning.
    PhaseStart,
    /// A card or board evaluation just finished.
    Evaluation,
    /// Between two consecutive attacks.
    BetweenAttacks,
    /// An attack just killed its target.
    AfterKill,
    /// A health icon was just struck.
    IconHit,
    /// The battle was not ready; the cycle is being skipped.
    Unavailable,
}

/// A single pacing beat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pause {
    pub kind: PauseKind,
    pub duration: Duration,
}

impl Pause {
    /// Create a pause of the given kind and duration.
    #[must_use]
    pub const fn new(kind: PauseKind, duration: Duration) -> Self {
        Self { kind, duration }
    }
}

/// Receives pacing beats from the engine.
///
/// Implementations decide how to spend the suggested duration. The engine
/// never assumes time actually passed.
pub trait Pacer {
    fn pause(&mut self, pause: Pause);
}

/// Ignores every pause. The right choice for headless simulation.
#[derive(Clone, Copy, Debug, Default)]
pub struct InstantPacer;

impl Pacer for InstantPacer {
    fn pause(&mut self, _pause: Pause) {}
}

/// Blocks the current thread for each pause's duration.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, pause: Pause) {
        if !pause.duration.is_zero() {
            std::thread::sleep(pause.duration);
        }
    }
}

/// Records every pause without waiting. Used in tests to assert rhythm.
#[derive(Clone, Debug, Default)]
pub struct RecordingPacer {
    pauses: Vec<Pause>,
}

impl RecordingPacer {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All pauses seen so far, in order.
    #[must_use]
    pub fn pauses(&self) -> &[Pause] {
        &self.pauses
    }

    /// How many pauses of the given kind were recorded.
    #[must_use]
    pub fn count(&self, kind: PauseKind) -> usize {
        self.pauses.iter().filter(|p| p.kind == kind).count()
    }

    /// Total suggested wait across all recorded pauses.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.pauses.iter().map(|p| p.duration).sum()
    }
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, pause: Pause) {
        self.pauses.push(pause);
    }
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    fn pause(&mut self, pause: Pause) {
        (**self).pause(pause);
    }
}
