//! Tactical value of unit keywords.
//!
//! Each keyword has a configured base value and a role (offensive or
//! defensive). Scoring bends the base toward whichever role the board
//! currently rewards: a side behind on health values its defensive
//! keywords more and its offensive ones less; a side that is level or
//! ahead leans the other way.

use std::cell::RefCell;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::BoardSnapshot;
use crate::config::{KeywordProfile, KeywordRole};
use crate::core::{Keyword, Unit};

/// Fraction of base added to defensive keywords under health disadvantage.
const DEFENSIVE_NEED_BONUS: f32 = 0.3;
/// Fraction of base removed from offensive keywords under health disadvantage.
const OFFENSIVE_NEED_PENALTY: f32 = 0.1;
/// Fraction of base added to offensive keywords otherwise.
const OFFENSIVE_PRESS_BONUS: f32 = 0.2;
/// Scores never leave `[-2 * base, 2 * base]`.
const CLAMP_FACTOR: f32 = 2.0;

/// Scores keywords for or against the acting side.
#[derive(Debug)]
pub struct KeywordScorer {
    profiles: FxHashMap<Keyword, KeywordProfile>,
    warned: RefCell<FxHashSet<Keyword>>,
}

impl KeywordScorer {
    /// Create a scorer over the given profile table.
    #[must_use]
    pub fn new(profiles: FxHashMap<Keyword, KeywordProfile>) -> Self {
        Self {
            profiles,
            warned: RefCell::new(FxHashSet::default()),
        }
    }

    /// Look up a keyword's profile. A missing entry scores zero and logs
    /// one warning for that keyword.
    fn profile(&self, keyword: Keyword) -> Option<KeywordProfile> {
        let profile = self.profiles.get(&keyword).copied();
        if profile.is_none() && self.warned.borrow_mut().insert(keyword) {
            tracing::warn!(%keyword, "no profile for keyword, scoring as neutral");
        }
        profile
    }

    /// Score one keyword from the acting side's point of view.
    ///
    /// `own` is true when the keyword sits on the acting side's card or
    /// unit. An opponent's keyword scores as the negated base value.
    #[must_use]
    pub fn score(&self, keyword: Keyword, own: bool, board: &BoardSnapshot) -> f32 {
        let Some(profile) = self.profile(keyword) else {
            return 0.0;
        };
        let base = profile.value;
        if base == 0.0 {
            return 0.0;
        }

        let score = if own {
            let mut score = base;
            if board.health_disadvantage() {
                match profile.role {
                    KeywordRole::Defensive => score += DEFENSIVE_NEED_BONUS * base,
                    KeywordRole::Offensive => score -= OFFENSIVE_NEED_PENALTY * base,
                }
            } else if profile.role == KeywordRole::Offensive {
                score += OFFENSIVE_PRESS_BONUS * base;
            }
            score
        } else if base > 0.0 {
            -base
        } else {
            base
        };

        let bound = CLAMP_FACTOR * base.abs();
        score.clamp(-bound, bound)
    }

    /// Net keyword advantage of `attacker` over `target`.
    ///
    /// Sums the attacker's keyword values and subtracts the target's, so
    /// a target bristling with strong keywords drags the matchup down.
    #[must_use]
    pub fn matchup(&self, attacker: &Unit, target: &Unit, board: &BoardSnapshot) -> f32 {
        let ours: f32 = attacker
            .keywords
            .iter()
            .map(|k| self.score(k, true, board))
            .sum();
        let theirs: f32 = target
            .keywords
            .iter()
            .map(|k| self.score(k, true, board))
            .sum();
        ours - theirs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{KeywordSet, Side, UnitId};

    fn scorer() -> KeywordScorer {
        KeywordScorer::new(KeywordProfile::default_table())
    }

    fn board_with_advantage(advantage: i32) -> BoardSnapshot {
        BoardSnapshot::new(Side::Enemy)
            .with_icon(Side::Enemy, 20 + advantage, 30)
            .with_icon(Side::Player, 20, 30)
    }

    fn unit_with(keywords: KeywordSet, side: Side) -> Unit {
        Unit {
            id: UnitId::new(1),
            side,
            slot: 0,
            attack: 2,
            health: 2,
            max_health: 2,
            keywords,
            pending_burn: 0,
        }
    }

    #[test]
    fn test_defensive_keyword_under_disadvantage() {
        let board = board_with_advantage(-5);
        // Taunt base 30, +30% when behind on health.
        assert!((scorer().score(Keyword::Taunt, true, &board) - 39.0).abs() < 1e-4);
    }

    #[test]
    fn test_offensive_keyword_under_disadvantage() {
        let board = board_with_advantage(-5);
        // Ranged base 25, -10% when behind.
        assert!((scorer().score(Keyword::Ranged, true, &board) - 22.5).abs() < 1e-4);
    }

    #[test]
    fn test_offensive_keyword_when_level() {
        let board = board_with_advantage(0);
        // Ranged base 25, +20% when not behind.
        assert!((scorer().score(Keyword::Ranged, true, &board) - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_opponent_keyword_negated() {
        let board = board_with_advantage(0);
        assert!((scorer().score(Keyword::Taunt, false, &board) + 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_clamped_to_twice_base() {
        let mut profiles = FxHashMap::default();
        profiles.insert(Keyword::Taunt, KeywordProfile::new(10.0, KeywordRole::Defensive));
        let scorer = KeywordScorer::new(profiles);
        let board = board_with_advantage(-5);
        let score = scorer.score(Keyword::Taunt, true, &board);
        assert!(score <= 20.0);
    }

    #[test]
    fn test_missing_profile_is_neutral() {
        let scorer = KeywordScorer::new(FxHashMap::default());
        let board = board_with_advantage(0);
        assert_eq!(scorer.score(Keyword::Overwhelm, true, &board), 0.0);
        // Second call still neutral, and must not panic on the warn-once path.
        assert_eq!(scorer.score(Keyword::Overwhelm, true, &board), 0.0);
    }

    #[test]
    fn test_matchup_sums_and_subtracts() {
        let board = board_with_advantage(0);
        let attacker = unit_with(KeywordSet::new().with(Keyword::Overwhelm), Side::Enemy);
        let target = unit_with(KeywordSet::new().with(Keyword::Taunt), Side::Player);

        let scorer = scorer();
        let expected = scorer.score(Keyword::Overwhelm, true, &board)
            - scorer.score(Keyword::Taunt, true, &board);
        assert!((scorer.matchup(&attacker, &target, &board) - expected).abs() < 1e-4);
    }
}
