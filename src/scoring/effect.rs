//! Value of spell and ongoing effects, and target selection for them.
//!
//! Every effect kind carries a configured profile (base value, polarity,
//! stackability, targeting and damage flags). Scoring starts from the
//! base and layers situational bonuses: pressing a wounded icon, stacking
//! onto a target that already burns, drawing while behind on cards.
//! Totals stay within three times the base either way.
//!
//! Draw and Bloodprice do not fit the generic shape and get their own
//! branches. Draw in particular must respect the hand limit: drawing
//! cards that cannot be held is scored as waste.

use std::cell::RefCell;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::BoardSnapshot;
use crate::config::EffectProfile;
use crate::core::{Effect, EffectKind, TargetRef, Unit};
use crate::host::OngoingEffects;

/// Fraction of base added when a stackable effect lands on a carrier.
const STACK_BONUS: f32 = 0.25;
/// Icon ratio at or below which damage gets the big finisher bonus.
const ICON_DESPERATE_RATIO: f32 = 0.3;
const ICON_DESPERATE_BONUS: f32 = 0.6;
/// Icon ratio at or below which damage gets the smaller finisher bonus.
const ICON_WOUNDED_RATIO: f32 = 0.5;
const ICON_WOUNDED_BONUS: f32 = 0.4;
/// From this turn on, icon damage gains an extra additive bonus.
const ICON_PRESSURE_TURN: u32 = 10;
const ICON_PRESSURE_BONUS: f32 = 0.3;
/// Damage into a unit below half health gets this fraction of base.
const WOUNDED_UNIT_RATIO: f32 = 0.5;
const WOUNDED_UNIT_BONUS: f32 = 0.2;
/// Non-damaging effects gain this under a health disadvantage.
const SUPPORT_NEED_BONUS: f32 = 0.1;

const DRAW_EMPTY_HAND: usize = 1;
const DRAW_EMPTY_HAND_BONUS: f32 = 0.5;
const DRAW_SMALL_HAND: usize = 2;
const DRAW_SMALL_HAND_BONUS: f32 = 0.3;
const DRAW_EARLY_TURNS: u32 = 3;
const DRAW_EARLY_BONUS: f32 = 0.2;
/// Per-card bonus when behind on cards, and its cap.
const DRAW_DEFICIT_STEP: f32 = 5.0;
const DRAW_DEFICIT_CAP: f32 = 20.0;
/// Flat nudges for spare mana and a held board.
const DRAW_RICH_MANA: i32 = 5;
const DRAW_NUDGE: f32 = 5.0;
/// Penalty per drawn card that would not fit in the hand.
const DRAW_OVERFLOW_PENALTY: f32 = 20.0;

/// Above this health ratio, paying health is cheap.
const BLOOD_HEALTHY_RATIO: f32 = 0.7;
const BLOOD_HEALTHY_MULT: f32 = 0.6;
/// Below this health ratio, paying health is reckless.
const BLOOD_DESPERATE_RATIO: f32 = 0.2;
const BLOOD_DESPERATE_MULT: f32 = 2.0;
const BLOOD_LATE_TURN: u32 = 10;
const BLOOD_LATE_MULT: f32 = 1.2;

/// Scores never leave `[-3 * base, 3 * base]`.
const CLAMP_FACTOR: f32 = 3.0;

const THREAT_ATTACK_WEIGHT: f32 = 1.2;
const THREAT_HEALTH_WEIGHT: f32 = 0.8;

/// How dangerous a unit is to leave standing.
fn threat(unit: &Unit) -> f32 {
    unit.attack as f32 * THREAT_ATTACK_WEIGHT + unit.health as f32 * THREAT_HEALTH_WEIGHT
}

/// Scores effects and picks targets for them.
#[derive(Debug)]
pub struct EffectScorer {
    profiles: FxHashMap<EffectKind, EffectProfile>,
    warned: RefCell<FxHashSet<EffectKind>>,
}

impl EffectScorer {
    /// Create a scorer over the given profile table.
    #[must_use]
    pub fn new(profiles: FxHashMap<EffectKind, EffectProfile>) -> Self {
        Self {
            profiles,
            warned: RefCell::new(FxHashSet::default()),
        }
    }

    /// Look up an effect kind's profile. A missing entry scores zero and
    /// logs one warning for that kind.
    fn profile(&self, kind: EffectKind) -> Option<EffectProfile> {
        let profile = self.profiles.get(&kind).copied();
        if profile.is_none() && self.warned.borrow_mut().insert(kind) {
            tracing::warn!(%kind, "no profile for effect kind, scoring as neutral");
        }
        profile
    }

    /// Score one effect from the acting side's point of view.
    ///
    /// `own` is true when the acting side would be the one resolving the
    /// effect; an opponent's positive effect scores as the negated base.
    /// `target` feeds the target-sensitive bonuses and may be `None`
    /// when no target has been chosen yet.
    #[must_use]
    pub fn score<R: OngoingEffects>(
        &self,
        effect: &Effect,
        own: bool,
        target: Option<TargetRef>,
        board: &BoardSnapshot,
        registry: &R,
    ) -> f32 {
        let Some(profile) = self.profile(effect.kind) else {
            return 0.0;
        };
        let base = profile.base;
        if base == 0.0 {
            return 0.0;
        }

        let score = if !own {
            if profile.positive {
                -base
            } else {
                base
            }
        } else {
            match effect.kind {
                EffectKind::Draw => self.draw_score(base, effect.value, board),
                EffectKind::Bloodprice => bloodprice_score(base, board),
                _ => self.generic_score(&profile, effect, target, board, registry),
            }
        };

        let bound = CLAMP_FACTOR * base.abs();
        score.clamp(-bound, bound)
    }

    fn generic_score<R: OngoingEffects>(
        &self,
        profile: &EffectProfile,
        effect: &Effect,
        target: Option<TargetRef>,
        board: &BoardSnapshot,
        registry: &R,
    ) -> f32 {
        let base = profile.base;
        let mut score = base;

        if profile.stackable
            && target.is_some_and(|t| registry.carries(t, effect.kind))
        {
            score += STACK_BONUS * base;
        }

        if profile.damaging {
            match target {
                Some(TargetRef::Icon(side)) => {
                    let ratio = board.icon_of(side).health_ratio();
                    let mut bonus = if ratio <= ICON_DESPERATE_RATIO {
                        ICON_DESPERATE_BONUS
                    } else if ratio <= ICON_WOUNDED_RATIO {
                        ICON_WOUNDED_BONUS
                    } else {
                        0.0
                    };
                    if board.turn >= ICON_PRESSURE_TURN {
                        bonus += ICON_PRESSURE_BONUS;
                    }
                    score += bonus * base;
                }
                Some(TargetRef::Unit(id)) => {
                    if let Some(unit) = board.unit(id) {
                        if unit.health_ratio() < WOUNDED_UNIT_RATIO {
                            score += WOUNDED_UNIT_BONUS * base;
                        }
                    }
                }
                None => {}
            }
        } else if board.health_disadvantage() {
            score += SUPPORT_NEED_BONUS * base;
        }

        score
    }

    fn draw_score(&self, base: f32, value: i32, board: &BoardSnapshot) -> f32 {
        let mut score = base;
        let hand = board.own_hand_size();

        if hand <= DRAW_EMPTY_HAND {
            score += DRAW_EMPTY_HAND_BONUS * base;
        } else if hand <= DRAW_SMALL_HAND {
            score += DRAW_SMALL_HAND_BONUS * base;
        }
        if board.turn <= DRAW_EARLY_TURNS {
            score += DRAW_EARLY_BONUS * base;
        }

        let deficit = -board.card_advantage();
        if deficit > 0 {
            score += (deficit as f32 * DRAW_DEFICIT_STEP).min(DRAW_DEFICIT_CAP);
        }
        if board.own_mana() >= DRAW_RICH_MANA {
            score += DRAW_NUDGE;
        }
        if board.control_difference() > 0.0 {
            score += DRAW_NUDGE;
        }

        let free_slots = board.hand_limit.saturating_sub(hand) as i32;
        if value > free_slots {
            score -= DRAW_OVERFLOW_PENALTY * (value - free_slots) as f32;
        }

        score
    }

    /// Does this effect kind need a target to resolve? Unknown kinds
    /// demand nothing.
    #[must_use]
    pub fn demands_target(&self, kind: EffectKind) -> bool {
        self.profile(kind).is_some_and(|p| p.requires_target)
    }

    /// Is this effect kind damaging? Unknown kinds are not.
    #[must_use]
    pub fn is_damaging(&self, kind: EffectKind) -> bool {
        self.profile(kind).is_some_and(|p| p.damaging)
    }

    /// Pick the best target for an effect on the current board.
    ///
    /// Damaging effects chase the highest-threat opposing unit and fall
    /// back to the opposing icon only when the board is empty. Heal finds
    /// the most wounded friendly unit, then the own icon, then nothing.
    /// Other friendly buffs protect the highest-threat own unit.
    #[must_use]
    pub fn best_target(&self, effect: &Effect, board: &BoardSnapshot) -> Option<TargetRef> {
        let profile = self.profile(effect.kind)?;
        let own_side = board.acting_side;

        if !profile.requires_target {
            return Some(TargetRef::Icon(own_side));
        }

        if profile.damaging {
            return board
                .foe_units()
                .iter()
                .max_by(|a, b| threat(a).total_cmp(&threat(b)))
                .map(|u| TargetRef::Unit(u.id))
                .or(Some(TargetRef::Icon(own_side.opponent())));
        }

        match effect.kind {
            EffectKind::Heal => board
                .own_units()
                .iter()
                .filter(|u| u.is_wounded())
                .min_by(|a, b| a.health_ratio().total_cmp(&b.health_ratio()))
                .map(|u| TargetRef::Unit(u.id))
                .or_else(|| {
                    let icon = board.own_icon();
                    (icon.health < icon.max_health).then_some(TargetRef::Icon(own_side))
                }),
            _ => board
                .own_units()
                .iter()
                .max_by(|a, b| threat(a).total_cmp(&threat(b)))
                .map(|u| TargetRef::Unit(u.id)),
        }
    }
}

fn bloodprice_score(base: f32, board: &BoardSnapshot) -> f32 {
    let ratio = board.health_ratio();
    let mut mult = if ratio > BLOOD_HEALTHY_RATIO {
        BLOOD_HEALTHY_MULT
    } else if ratio < BLOOD_DESPERATE_RATIO {
        BLOOD_DESPERATE_MULT
    } else {
        1.0
    };
    if board.turn >= BLOOD_LATE_TURN {
        mult *= BLOOD_LATE_MULT;
    }
    base * mult
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EffectProfile;
    use crate::core::{ActiveEffect, KeywordSet, Side, UnitId};
    use crate::host::SimBattle;

    fn scorer() -> EffectScorer {
        EffectScorer::new(EffectProfile::default_table())
    }

    fn unit(id: u32, side: Side, attack: i32, health: i32, max: i32) -> Unit {
        Unit {
            id: UnitId::new(id),
            side,
            slot: 0,
            attack,
            health,
            max_health: max,
            keywords: KeywordSet::new(),
            pending_burn: 0,
        }
    }

    #[test]
    fn test_damage_bonus_against_wounded_unit() {
        let registry = SimBattle::new();
        let board = BoardSnapshot::new(Side::Enemy)
            .with_unit(unit(1, Side::Player, 2, 2, 6))
            .with_unit(unit(2, Side::Player, 2, 5, 6));

        let wounded = scorer().score(
            &Effect::damage(3),
            true,
            Some(TargetRef::Unit(UnitId::new(1))),
            &board,
            &registry,
        );
        let healthy = scorer().score(
            &Effect::damage(3),
            true,
            Some(TargetRef::Unit(UnitId::new(2))),
            &board,
            &registry,
        );
        // +20% of base 40 on the sub-half-health target.
        assert!((wounded - healthy - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_icon_finisher_bonuses_compose_additively() {
        let registry = SimBattle::new();
        let target = Some(TargetRef::Icon(Side::Player));

        let base_board = BoardSnapshot::new(Side::Enemy).with_icon(Side::Player, 30, 30);
        let low_board = BoardSnapshot::new(Side::Enemy).with_icon(Side::Player, 9, 30);
        let late_low = BoardSnapshot::new(Side::Enemy)
            .with_icon(Side::Player, 9, 30)
            .with_turn(10);

        let s = scorer();
        let neutral = s.score(&Effect::damage(3), true, target, &base_board, &registry);
        let low = s.score(&Effect::damage(3), true, target, &low_board, &registry);
        let late = s.score(&Effect::damage(3), true, target, &late_low, &registry);

        assert!((low - neutral - 24.0).abs() < 1e-4, "60% of base 40");
        assert!((late - low - 12.0).abs() < 1e-4, "+30% more past turn 10");
    }

    #[test]
    fn test_icon_mid_tier() {
        let registry = SimBattle::new();
        let target = Some(TargetRef::Icon(Side::Player));
        let board = BoardSnapshot::new(Side::Enemy).with_icon(Side::Player, 15, 30);
        let neutral_board = BoardSnapshot::new(Side::Enemy).with_icon(Side::Player, 30, 30);

        let s = scorer();
        let mid = s.score(&Effect::damage(3), true, target, &board, &registry);
        let neutral = s.score(&Effect::damage(3), true, target, &neutral_board, &registry);
        assert!((mid - neutral - 16.0).abs() < 1e-4, "40% of base 40");
    }

    #[test]
    fn test_stackable_bonus_on_carrier() {
        let carrier = TargetRef::Unit(UnitId::new(1));
        let registry = SimBattle::new()
            .with_unit(
                Side::Player,
                0,
                crate::core::FieldUnit::new(UnitId::new(1), 2, 6, KeywordSet::new()),
            )
            .with_ongoing(
                carrier,
                ActiveEffect {
                    kind: EffectKind::Burn,
                    value: 2,
                    remaining_rounds: 2,
                },
            );
        let board = BoardSnapshot::new(Side::Enemy).with_unit(unit(1, Side::Player, 2, 6, 6));

        let s = scorer();
        let stacked = s.score(&Effect::burn(2, 2), true, Some(carrier), &board, &registry);
        let fresh_registry = SimBattle::new();
        let fresh = s.score(&Effect::burn(2, 2), true, Some(carrier), &board, &fresh_registry);
        // +25% of base 30.
        assert!((stacked - fresh - 7.5).abs() < 1e-4);
    }

    #[test]
    fn test_support_gains_under_disadvantage() {
        let registry = SimBattle::new();
        let behind = BoardSnapshot::new(Side::Enemy)
            .with_icon(Side::Enemy, 10, 30)
            .with_icon(Side::Player, 20, 30);
        let level = BoardSnapshot::new(Side::Enemy);

        let s = scorer();
        let pressed = s.score(&Effect::heal(4), true, None, &behind, &registry);
        let relaxed = s.score(&Effect::heal(4), true, None, &level, &registry);
        // +10% of base 35.
        assert!((pressed - relaxed - 3.5).abs() < 1e-4);
    }

    #[test]
    fn test_draw_overflow_penalty() {
        let registry = SimBattle::new();
        let board = BoardSnapshot::new(Side::Enemy)
            .with_hand_size(Side::Enemy, 8)
            .with_hand_limit(10);

        let s = scorer();
        let overdraw = s.score(&Effect::draw(5), true, None, &board, &registry);
        let fits = s.score(&Effect::draw(2), true, None, &board, &registry);
        // Two free slots: three wasted cards at 20 apiece.
        assert!((fits - overdraw - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_draw_small_hand_bonus() {
        let registry = SimBattle::new();
        let starving = BoardSnapshot::new(Side::Enemy)
            .with_hand_size(Side::Enemy, 1)
            .with_turn(5);
        let flush = BoardSnapshot::new(Side::Enemy)
            .with_hand_size(Side::Enemy, 6)
            .with_turn(5);

        let s = scorer();
        let hungry = s.score(&Effect::draw(1), true, None, &starving, &registry);
        let full = s.score(&Effect::draw(1), true, None, &flush, &registry);
        // +50% of base 25 on the one-card hand.
        assert!((hungry - full - 12.5).abs() < 1e-4);
    }

    #[test]
    fn test_bloodprice_cheap_when_healthy() {
        let registry = SimBattle::new();
        let healthy = BoardSnapshot::new(Side::Enemy).with_icon(Side::Enemy, 30, 30);
        let dying = BoardSnapshot::new(Side::Enemy).with_icon(Side::Enemy, 5, 30);

        let s = scorer();
        let cheap = s.score(&Effect::bloodprice(3), true, None, &healthy, &registry);
        let dear = s.score(&Effect::bloodprice(3), true, None, &dying, &registry);
        assert!((cheap - -12.0).abs() < 1e-4, "base -20 at x0.6");
        assert!((dear - -40.0).abs() < 1e-4, "base -20 at x2.0");
    }

    #[test]
    fn test_opponent_positive_effect_negated() {
        let registry = SimBattle::new();
        let board = BoardSnapshot::new(Side::Enemy);
        let s = scorer();
        let own = s.score(&Effect::heal(4), true, None, &board, &registry);
        let theirs = s.score(&Effect::heal(4), false, None, &board, &registry);
        assert!((theirs + 35.0).abs() < 1e-4);
        assert!((own - 35.0).abs() < 1e-4);
    }

    #[test]
    fn test_unknown_kind_scores_zero() {
        let registry = SimBattle::new();
        let board = BoardSnapshot::new(Side::Enemy);
        let empty = EffectScorer::new(FxHashMap::default());
        assert_eq!(
            empty.score(&Effect::damage(3), true, None, &board, &registry),
            0.0
        );
    }

    #[test]
    fn test_best_target_damaging_prefers_threat() {
        let board = BoardSnapshot::new(Side::Enemy)
            .with_unit(unit(1, Side::Player, 1, 2, 2))
            .with_unit(unit(2, Side::Player, 5, 4, 4));

        let target = scorer().best_target(&Effect::damage(3), &board);
        assert_eq!(target, Some(TargetRef::Unit(UnitId::new(2))));
    }

    #[test]
    fn test_best_target_damaging_falls_back_to_icon() {
        let board = BoardSnapshot::new(Side::Enemy);
        let target = scorer().best_target(&Effect::damage(3), &board);
        assert_eq!(target, Some(TargetRef::Icon(Side::Player)));
    }

    #[test]
    fn test_best_target_heal_picks_most_wounded() {
        let board = BoardSnapshot::new(Side::Enemy)
            .with_unit(unit(1, Side::Enemy, 2, 5, 6))
            .with_unit(unit(2, Side::Enemy, 2, 1, 6))
            .with_unit(unit(3, Side::Enemy, 2, 6, 6));

        let target = scorer().best_target(&Effect::heal(3), &board);
        assert_eq!(target, Some(TargetRef::Unit(UnitId::new(2))));
    }

    #[test]
    fn test_best_target_heal_icon_fallback() {
        let wounded_icon = BoardSnapshot::new(Side::Enemy).with_icon(Side::Enemy, 20, 30);
        assert_eq!(
            scorer().best_target(&Effect::heal(3), &wounded_icon),
            Some(TargetRef::Icon(Side::Enemy))
        );

        let full_icon = BoardSnapshot::new(Side::Enemy);
        assert_eq!(scorer().best_target(&Effect::heal(3), &full_icon), None);
    }

    #[test]
    fn test_best_target_draw_anchors_to_own_icon() {
        let board = BoardSnapshot::new(Side::Enemy);
        assert_eq!(
            scorer().best_target(&Effect::draw(2), &board),
            Some(TargetRef::Icon(Side::Enemy))
        );
    }

    #[test]
    fn test_best_target_shield_protects_biggest_unit() {
        let board = BoardSnapshot::new(Side::Enemy)
            .with_unit(unit(1, Side::Enemy, 1, 2, 2))
            .with_unit(unit(2, Side::Enemy, 4, 4, 4));
        assert_eq!(
            scorer().best_target(&Effect::shield(2, 2), &board),
            Some(TargetRef::Unit(UnitId::new(2)))
        );
    }
}
