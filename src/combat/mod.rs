//! The attack phase: lethal detection, attacker ordering, targeting.
//!
//! [`AttackDirector`] runs the cycle. The free functions are the pure
//! pieces it composes: [`assess_lethal`] decides whether this turn can
//! close the game, [`order_attackers`] sequences the swing, and
//! [`select_target`] picks each attacker's victim. All three work on
//! snapshot units, so they are directly testable without a host.

mod director;
mod lethal;
mod ordering;
mod targeting;

pub use director::{AttackDirector, AttackRecord, AttackReport};
pub use lethal::{assess_lethal, LethalAssessment};
pub use ordering::order_attackers;
pub use targeting::select_target;

use crate::core::{Keyword, KeywordSet};

/// Damage a hit actually deals once the target's keywords are applied.
///
/// Tough halves incoming damage, rounding up.
#[must_use]
pub fn effective_damage(raw: i32, target_keywords: KeywordSet) -> i32 {
    if target_keywords.contains(Keyword::Tough) {
        (raw + 1) / 2
    } else {
        raw
    }
}
