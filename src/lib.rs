//! # duelmind
//!
//! A heuristic opponent engine for two-player card battles.
//!
//! ## Design Principles
//!
//! 1. **Host-Agnostic**: The engine never owns game state. It reads the
//!    battle through the traits in [`host`] and acts through the same
//!    traits, so it drops into any rules implementation.
//!
//! 2. **Deterministic Randomness**: Every probabilistic choice flows
//!    through a seeded [`core::DecisionRng`]. Same seed, same host
//!    states, same decisions.
//!
//! 3. **Tunable Over Hardcoded**: Thresholds, bonuses, and chances live
//!    in [`EngineConfig`] and serialize with serde. Behavior changes are
//!    config edits, not code edits.
//!
//! ## Architecture
//!
//! - **Snapshot, Then Decide**: Each decision cycle freezes the battle
//!   into a [`BoardSnapshot`] and scores against the copy. Host mutations
//!   mid-cycle trigger a fresh snapshot, never act on stale data.
//!
//! - **Explainable Scores**: Card and target scores build up as
//!   [`ScoreBreakdown`] term lists, so a log line can show why a play
//!   won.
//!
//! - **Directors Per Phase**: Card play and combat are separate
//!   single-pass directors behind one [`OpponentController`] facade.
//!
//! ## Modules
//!
//! - `core`: Cards, units, keywords, effects, sides, RNG
//! - `board`: Battle snapshots and the evaluator that grades them
//! - `host`: Traits the game implements, plus an in-memory sim
//! - `scoring`: Keyword, effect, and whole-card scoring
//! - `tactics`: Strategic posture and the attack-skip advisor
//! - `play`: Card-play ordering, slot placement, the play director
//! - `combat`: Lethal detection, attack ordering, targeting, the attack director
//! - `pacing`: Humanizing delays between decisions
//! - `config`: Every tunable in one serializable tree

pub mod board;
pub mod combat;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod host;
pub mod pacing;
pub mod play;
pub mod scoring;
pub mod tactics;

// Re-export commonly used types
pub use crate::engine::OpponentController;

pub use crate::config::{
    EffectProfile, EngineConfig, EvaluationConfig, KeywordProfile, KeywordRole, NoiseConfig,
    PacingConfig, StrategyConfig,
};

pub use crate::core::{
    Card, CardId, CardKind, DecisionRng, Effect, EffectKind, FieldUnit, HealthIcon, Keyword,
    KeywordSet, Phase, Side, TargetRef, Unit, UnitId,
};

pub use crate::board::{BoardEvaluator, BoardSnapshot};

pub use crate::host::{
    AttackLimiter, AttackOutcome, BattleHost, Battlefield, CombatResolver, IconOutcome, MatchView,
    OngoingEffects, SimBattle, SpellApplier,
};

pub use crate::scoring::{CardScorer, EffectScorer, KeywordScorer, Op, ScoreBreakdown, Term};

pub use crate::tactics::{Posture, PostureClassifier, SkipAdvisor, SkipReason};

pub use crate::play::{PlayAction, PlayDirector, PlayReport, PlayedCard};

pub use crate::combat::{
    assess_lethal, AttackDirector, AttackRecord, AttackReport, LethalAssessment,
};

pub use crate::pacing::{InstantPacer, Pacer, Pause, PauseKind, RecordingPacer, ThreadPacer};

pub use crate::error::{HostError, SnapshotError};
