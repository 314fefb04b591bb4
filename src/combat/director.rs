//! Drives the attack phase as a small state machine.
//!
//! ## Attack Cycle
//!
//! 1. Pause, snapshot (with retries), validate phase and turn ownership.
//! 2. Classify posture, gather attackers with attacks remaining, and let
//!    the skip advisor decline the whole swing on a held-lead board.
//! 3. Assess lethal and order the attackers accordingly.
//! 4. For each attacker: re-snapshot, re-validate the unit still stands,
//!    pick a target, resolve, and record the outcome. Kills and icon
//!    hits earn extra pauses so a watching player can follow along.
//!
//! Icon strikes happen only when the defending board is empty; targeting
//! never offers the icon while a defender lives. A host error aborts the
//! single attack, never the phase.

use tracing::{debug, warn};

use crate::board::BoardEvaluator;
use crate::combat::{assess_lethal, order_attackers, select_target};
use crate::config::EngineConfig;
use crate::core::{DecisionRng, Phase, Side, TargetRef, Unit, UnitId};
use crate::host::{AttackLimiter, Battlefield, CombatResolver, MatchView, OngoingEffects};
use crate::pacing::{Pacer, Pause, PauseKind};
use crate::scoring::KeywordScorer;
use crate::tactics::{Posture, PostureClassifier, SkipAdvisor, SkipReason};

/// One resolved attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackRecord {
    pub attacker: UnitId,
    pub target: TargetRef,
    pub killed_target: bool,
    pub lost_attacker: bool,
}

/// Everything the attack phase did, for logs and tests.
#[derive(Clone, Debug, Default)]
pub struct AttackReport {
    /// Why nothing was attempted, when nothing was.
    pub skipped: Option<SkipReason>,
    /// The stance classified for this cycle, once known.
    pub posture: Option<Posture>,
    /// Whether the opening assessment saw lethal on board.
    pub lethal_planned: bool,
    pub attacks: Vec<AttackRecord>,
}

impl AttackReport {
    fn skip(reason: SkipReason) -> Self {
        Self {
            skipped: Some(reason),
            ..Self::default()
        }
    }

    /// Did the phase resolve at least one attack?
    #[must_use]
    pub fn acted(&self) -> bool {
        !self.attacks.is_empty()
    }
}

/// Orchestrates attacks for one side.
pub struct AttackDirector<'a> {
    side: Side,
    config: &'a EngineConfig,
    evaluator: &'a BoardEvaluator,
    keywords: &'a KeywordScorer,
}

impl<'a> AttackDirector<'a> {
    /// Create a director acting for `side`.
    #[must_use]
    pub fn new(
        side: Side,
        config: &'a EngineConfig,
        evaluator: &'a BoardEvaluator,
        keywords: &'a KeywordScorer,
    ) -> Self {
        Self {
            side,
            config,
            evaluator,
            keywords,
        }
    }

    /// Run one attack cycle against the host.
    pub fn run<H, P>(&self, host: &mut H, pacer: &mut P, rng: &mut DecisionRng) -> AttackReport
    where
        H: MatchView + Battlefield + OngoingEffects + AttackLimiter + CombatResolver,
        P: Pacer + ?Sized,
    {
        let pacing = &self.config.pacing;
        pacer.pause(Pause::new(PauseKind::PhaseStart, pacing.phase_start));

        let Ok(board) = self.evaluator.evaluate_with_retry(
            host,
            self.side,
            self.config.snapshot_attempts,
            pacing.unavailable,
            pacer,
        ) else {
            warn!(side = %self.side, "attack skipped: host not ready");
            return AttackReport::skip(SkipReason::NotReady);
        };

        if board.phase != Phase::Combat {
            return AttackReport::skip(SkipReason::WrongPhase);
        }
        if host.active_side() != self.side {
            return AttackReport::skip(SkipReason::NotOurTurn);
        }

        let posture = PostureClassifier::new(self.config.strategy.clone()).classify(&board, rng);

        let mut attackers: Vec<Unit> = board
            .own_units()
            .iter()
            .filter(|u| host.can_attack(u.id))
            .cloned()
            .collect();
        if attackers.is_empty() {
            let mut report = AttackReport::skip(SkipReason::NothingToDo);
            report.posture = Some(posture);
            return report;
        }

        let advisor = SkipAdvisor::new(self.config.strategy.clone());
        if advisor.should_skip(&board, posture, rng) {
            debug!(side = %self.side, "attack declined to hold the board");
            let mut report = AttackReport::skip(SkipReason::Declined);
            report.posture = Some(posture);
            return report;
        }

        let assessment = assess_lethal(&attackers, board.foe_units(), board.foe_icon());
        order_attackers(
            &mut attackers,
            board.foe_units(),
            assessment.lethal,
            self.config.noise.shuffle_chance,
            rng,
        );
        debug!(
            side = %self.side,
            %posture,
            lethal = assessment.lethal,
            attackers = attackers.len(),
            "attack plan ready"
        );

        let mut report = AttackReport {
            posture: Some(posture),
            lethal_planned: assessment.lethal,
            ..AttackReport::default()
        };

        let queue: Vec<UnitId> = attackers.iter().map(|u| u.id).collect();
        for id in queue {
            // Refresh: earlier attacks may have emptied slots or killed
            // this very attacker through splash.
            let Ok(fresh) = self.evaluator.evaluate(host, self.side) else {
                warn!(side = %self.side, "host became unavailable mid-attack");
                break;
            };
            let Some(attacker) = fresh.unit(id).cloned() else {
                continue;
            };
            if attacker.side != self.side || !host.can_attack(id) {
                continue;
            }

            let beat = pacing.per_attack.mul_f32(rng.jitter(pacing.attack_jitter));
            pacer.pause(Pause::new(PauseKind::BetweenAttacks, beat));

            let choice = select_target(
                &attacker,
                &fresh,
                posture,
                self.keywords,
                &self.config.noise,
                rng,
            );
            match choice {
                Some(target) => match host.resolve_attack(id, target) {
                    Ok(outcome) => {
                        host.register_attack(id);
                        debug!(
                            attacker = %id,
                            target = %target,
                            killed = outcome.target_killed,
                            lost = outcome.attacker_killed,
                            "attack resolved"
                        );
                        report.attacks.push(AttackRecord {
                            attacker: id,
                            target: TargetRef::Unit(target),
                            killed_target: outcome.target_killed,
                            lost_attacker: outcome.attacker_killed,
                        });
                        if outcome.target_killed {
                            pacer.pause(Pause::new(PauseKind::AfterKill, pacing.after_kill));
                        }
                    }
                    Err(err) => warn!(attacker = %id, %err, "attack aborted"),
                },
                None => match host.strike_icon(id, self.side.opponent()) {
                    Ok(outcome) => {
                        host.register_attack(id);
                        debug!(attacker = %id, damage = outcome.damage_dealt, "icon struck");
                        report.attacks.push(AttackRecord {
                            attacker: id,
                            target: TargetRef::Icon(self.side.opponent()),
                            killed_target: false,
                            lost_attacker: false,
                        });
                        pacer.pause(Pause::new(PauseKind::IconHit, pacing.icon_hit));
                        if outcome.icon_destroyed {
                            debug!(side = %self.side, "icon destroyed");
                            break;
                        }
                    }
                    Err(err) => warn!(attacker = %id, %err, "icon strike aborted"),
                },
            }
        }

        debug!(side = %self.side, attacks = report.attacks.len(), "attack phase complete");
        report
    }
}
