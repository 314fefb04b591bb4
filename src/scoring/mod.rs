//! Heuristic scoring of keywords, effects, and whole cards.
//!
//! The scorers form a small tower: [`KeywordScorer`] and [`EffectScorer`]
//! price single tags against a board snapshot, and [`CardScorer`] combines
//! them into one playability score per card, recorded as a
//! [`ScoreBreakdown`] for logging.
//!
//! All scorers are pure with respect to the snapshot they read. Randomness
//! enters later, when the play director perturbs the totals.

mod breakdown;
mod card;
mod effect;
mod keyword;

pub use breakdown::{Op, ScoreBreakdown, Term};
pub use card::CardScorer;
pub use effect::EffectScorer;
pub use keyword::KeywordScorer;
