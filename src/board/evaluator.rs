//! Builds [`BoardSnapshot`]s from a live host.
//!
//! The evaluator is the only component that touches host read APIs
//! directly; everything downstream works from the snapshot it returns.
//! Evaluation fails softly with [`SnapshotError::NotReady`] while the
//! host is still assembling the battle; callers treat that as "skip this
//! cycle", never as fatal.

use std::time::Duration;

use crate::board::BoardSnapshot;
use crate::config::EvaluationConfig;
use crate::core::{HealthIcon, Keyword, Side, TargetRef, Unit};
use crate::error::SnapshotError;
use crate::host::{Battlefield, MatchView, OngoingEffects};
use crate::pacing::{Pacer, Pause, PauseKind};

/// Snapshot builder with configurable control weights.
#[derive(Clone, Debug)]
pub struct BoardEvaluator {
    config: EvaluationConfig,
}

impl BoardEvaluator {
    /// Create an evaluator with the given weights.
    #[must_use]
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    /// Take a snapshot of the battle from `side`'s perspective.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::NotReady`] when the host reports the
    /// battle as not yet inspectable.
    pub fn evaluate<H>(&self, host: &H, side: Side) -> Result<BoardSnapshot, SnapshotError>
    where
        H: MatchView + Battlefield + OngoingEffects,
    {
        if !host.ready() {
            return Err(SnapshotError::NotReady);
        }

        let turn = host.turn();
        let player_units = collect_units(host, Side::Player);
        let enemy_units = collect_units(host, Side::Enemy);
        let player_icon = host.icon(Side::Player);
        let enemy_icon = host.icon(Side::Enemy);

        let mut player_control = self.control(&player_units, player_icon);
        let mut enemy_control = self.control(&enemy_units, enemy_icon);
        if turn > self.config.late_game_turn {
            match side {
                Side::Player => player_control *= self.config.late_game_mult,
                Side::Enemy => enemy_control *= self.config.late_game_mult,
            }
        }

        tracing::debug!(
            %side,
            turn,
            player_control,
            enemy_control,
            "board snapshot taken"
        );

        Ok(BoardSnapshot {
            acting_side: side,
            turn,
            phase: host.phase(),
            first_next_turn: host.first_next_turn(),
            player_icon,
            enemy_icon,
            player_mana: host.mana(Side::Player),
            enemy_mana: host.mana(Side::Enemy),
            player_hand_size: host.hand_size(Side::Player),
            enemy_hand_size: host.hand_size(Side::Enemy),
            hand_limit: host.hand_limit(side),
            player_units,
            enemy_units,
            player_control,
            enemy_control,
        })
    }

    /// Take a snapshot, pausing and retrying while the host is not ready.
    ///
    /// Each failed attempt is logged and followed by an `Unavailable`
    /// pause, so an engine polling a slow host degrades to a short
    /// placeholder delay instead of spinning.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::NotReady`] once all attempts are spent.
    pub fn evaluate_with_retry<H, P>(
        &self,
        host: &H,
        side: Side,
        attempts: u32,
        retry_pause: Duration,
        pacer: &mut P,
    ) -> Result<BoardSnapshot, SnapshotError>
    where
        H: MatchView + Battlefield + OngoingEffects,
        P: Pacer + ?Sized,
    {
        for attempt in 1..=attempts.max(1) {
            match self.evaluate(host, side) {
                Ok(snapshot) => return Ok(snapshot),
                Err(SnapshotError::NotReady) => {
                    tracing::warn!(attempt, "host not ready for snapshot");
                    pacer.pause(Pause::new(PauseKind::Unavailable, retry_pause));
                }
            }
        }
        Err(SnapshotError::NotReady)
    }

    /// Board control for one side's unit list and icon.
    ///
    /// Each unit contributes `attack + health`, amplified for Taunt and
    /// Ranged, discounted by pending burn. The icon adds a fraction of its
    /// health on top.
    fn control(&self, units: &[Unit], icon: HealthIcon) -> f32 {
        let mut total = 0.0f32;
        for unit in units {
            let mut presence = (unit.attack + unit.health) as f32;
            if unit.keywords.contains(Keyword::Taunt) {
                presence *= self.config.taunt_control_mult;
            }
            if unit.keywords.contains(Keyword::Ranged) {
                presence *= self.config.ranged_control_mult;
            }
            total += presence;
            total -= unit.pending_burn as f32 * self.config.burn_discount;
        }
        total + icon.health as f32 * self.config.icon_health_weight
    }
}

impl Default for BoardEvaluator {
    fn default() -> Self {
        Self::new(EvaluationConfig::default())
    }
}

/// Living placed units of one side, in slot order.
fn collect_units<H>(host: &H, side: Side) -> Vec<Unit>
where
    H: Battlefield + OngoingEffects,
{
    let mut units = Vec::new();
    for slot in 0..host.slot_count(side) {
        let Some(field_unit) = host.unit_at(side, slot) else {
            continue;
        };
        if !field_unit.is_active() {
            continue;
        }
        units.push(Unit {
            id: field_unit.id,
            side,
            slot,
            attack: field_unit.attack,
            health: field_unit.health,
            max_health: field_unit.max_health,
            keywords: field_unit.keywords,
            pending_burn: host.pending_burn(TargetRef::Unit(field_unit.id)),
        });
    }
    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActiveEffect, EffectKind, FieldUnit, KeywordSet, UnitId};
    use crate::host::SimBattle;

    #[test]
    fn test_not_ready_is_soft() {
        let host = SimBattle::new().with_ready(false);
        let evaluator = BoardEvaluator::default();
        assert_eq!(
            evaluator.evaluate(&host, Side::Enemy),
            Err(SnapshotError::NotReady)
        );
    }

    #[test]
    fn test_retry_pauses_each_attempt() {
        use crate::pacing::RecordingPacer;

        let host = SimBattle::new().with_ready(false);
        let evaluator = BoardEvaluator::default();
        let mut pacer = RecordingPacer::new();
        let result = evaluator.evaluate_with_retry(
            &host,
            Side::Enemy,
            3,
            Duration::from_millis(400),
            &mut pacer,
        );
        assert_eq!(result, Err(SnapshotError::NotReady));
        assert_eq!(pacer.count(PauseKind::Unavailable), 3);
    }

    #[test]
    fn test_retry_returns_on_first_success() {
        use crate::pacing::RecordingPacer;

        let host = SimBattle::new();
        let evaluator = BoardEvaluator::default();
        let mut pacer = RecordingPacer::new();
        let snap = evaluator
            .evaluate_with_retry(&host, Side::Enemy, 3, Duration::from_millis(400), &mut pacer)
            .unwrap();
        assert_eq!(snap.acting_side, Side::Enemy);
        assert_eq!(pacer.count(PauseKind::Unavailable), 0);
    }

    #[test]
    fn test_snapshot_skips_inactive_units() {
        let mut dead = FieldUnit::new(UnitId::new(2), 2, 2, KeywordSet::new());
        dead.dead = true;
        let mut fading = FieldUnit::new(UnitId::new(3), 2, 2, KeywordSet::new());
        fading.fading = true;
        let mut unplaced = FieldUnit::new(UnitId::new(4), 2, 2, KeywordSet::new());
        unplaced.placed = false;

        let host = SimBattle::new()
            .with_unit(Side::Enemy, 0, FieldUnit::new(UnitId::new(1), 3, 3, KeywordSet::new()))
            .with_unit(Side::Enemy, 1, dead)
            .with_unit(Side::Player, 0, fading)
            .with_unit(Side::Player, 1, unplaced);

        let snap = BoardEvaluator::default()
            .evaluate(&host, Side::Enemy)
            .unwrap();
        assert_eq!(snap.enemy_units.len(), 1);
        assert_eq!(snap.enemy_units[0].id, UnitId::new(1));
        assert!(snap.player_units.is_empty());
    }

    #[test]
    fn test_control_formula() {
        let taunt = FieldUnit::new(
            UnitId::new(1),
            3,
            4,
            KeywordSet::new().with(Keyword::Taunt),
        );
        let plain = FieldUnit::new(UnitId::new(2), 2, 2, KeywordSet::new());

        let host = SimBattle::new()
            .with_icon(Side::Enemy, 30, 30)
            .with_unit(Side::Enemy, 0, taunt)
            .with_unit(Side::Enemy, 1, plain)
            .with_ongoing(
                TargetRef::Unit(UnitId::new(2)),
                ActiveEffect {
                    kind: EffectKind::Burn,
                    value: 2,
                    remaining_rounds: 2,
                },
            );

        let snap = BoardEvaluator::default()
            .evaluate(&host, Side::Enemy)
            .unwrap();

        // (3+4)*1.3 + (2+2) - 4*0.8 + 30*0.2
        let expected = 9.1 + 4.0 - 3.2 + 6.0;
        assert!((snap.enemy_control - expected).abs() < 1e-4);
        assert_eq!(snap.enemy_units[1].pending_burn, 4);
    }

    #[test]
    fn test_late_game_boosts_acting_side_only() {
        let host = SimBattle::new()
            .with_turn(11)
            .with_icon(Side::Enemy, 30, 30)
            .with_icon(Side::Player, 30, 30)
            .with_unit(
                Side::Enemy,
                0,
                FieldUnit::new(UnitId::new(1), 2, 2, KeywordSet::new()),
            )
            .with_unit(
                Side::Player,
                0,
                FieldUnit::new(UnitId::new(2), 2, 2, KeywordSet::new()),
            );

        let snap = BoardEvaluator::default()
            .evaluate(&host, Side::Enemy)
            .unwrap();

        // Both sides field identical boards; only the acting side gets the
        // late-game multiplier.
        let base = 4.0 + 6.0;
        assert!((snap.enemy_control - base * 1.1).abs() < 1e-4);
        assert!((snap.player_control - base).abs() < 1e-4);
    }

    #[test]
    fn test_ranged_multiplier_composes_with_taunt() {
        let both = FieldUnit::new(
            UnitId::new(1),
            2,
            3,
            KeywordSet::new().with(Keyword::Taunt).with(Keyword::Ranged),
        );
        let host = SimBattle::new()
            .with_icon(Side::Enemy, 0, 30)
            .with_unit(Side::Enemy, 0, both);

        let snap = BoardEvaluator::default()
            .evaluate(&host, Side::Enemy)
            .unwrap();
        assert!((snap.enemy_control - 5.0 * 1.3 * 1.2).abs() < 1e-4);
    }
}
