//! Drives the card-play phase from scoring to summons and casts.
//!
//! ## Decision Cycle
//!
//! 1. Pause for the phase-start beat, then snapshot the board (with
//!    retries while the host is warming up).
//! 2. Validate phase and turn ownership; bail out softly otherwise.
//! 3. Score every legal card in hand, perturb the scores with decision
//!    noise, and sort descending.
//! 4. Attempt each card in order: monsters go to their best open slot,
//!    spells resolve one target per effect. A card with no slot or no
//!    target is held, never discarded.
//! 5. Stop once remaining mana cannot afford the cheapest remaining card.
//!
//! A host error while playing one card aborts that card only; the rest
//! of the sequence continues.

use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::board::{BoardEvaluator, BoardSnapshot};
use crate::config::EngineConfig;
use crate::core::{Card, CardId, CardKind, DecisionRng, Phase, Side, TargetRef, UnitId};
use crate::error::HostError;
use crate::host::{Battlefield, MatchView, OngoingEffects, SpellApplier};
use crate::pacing::{Pacer, Pause, PauseKind};
use crate::play::placement;
use crate::scoring::{CardScorer, EffectScorer, KeywordScorer};
use crate::tactics::{Posture, PostureClassifier, SkipReason};

/// What playing one card did to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayAction {
    /// A monster was summoned into a slot.
    Summoned { slot: usize, unit: UnitId },
    /// A spell resolved; `target` is its first demanded target, or the
    /// caster's icon for untargeted spells.
    Cast { target: TargetRef },
}

/// One successfully played card.
#[derive(Clone, Debug)]
pub struct PlayedCard {
    pub card: CardId,
    pub name: String,
    pub cost: i32,
    /// The noised score the card was ordered by.
    pub score: f32,
    pub action: PlayAction,
}

/// Everything the play phase did, for logs and tests.
#[derive(Clone, Debug, Default)]
pub struct PlayReport {
    /// Why nothing was attempted, when nothing was.
    pub skipped: Option<SkipReason>,
    /// The stance classified for this cycle, once known.
    pub posture: Option<Posture>,
    pub plays: Vec<PlayedCard>,
    pub mana_spent: i32,
}

impl PlayReport {
    fn skip(reason: SkipReason) -> Self {
        Self {
            skipped: Some(reason),
            ..Self::default()
        }
    }

    /// Did the phase play at least one card?
    #[must_use]
    pub fn acted(&self) -> bool {
        !self.plays.is_empty()
    }
}

/// Orchestrates card plays for one side.
pub struct PlayDirector<'a> {
    side: Side,
    config: &'a EngineConfig,
    evaluator: &'a BoardEvaluator,
    keywords: &'a KeywordScorer,
    effects: &'a EffectScorer,
}

impl<'a> PlayDirector<'a> {
    /// Create a director acting for `side`.
    #[must_use]
    pub fn new(
        side: Side,
        config: &'a EngineConfig,
        evaluator: &'a BoardEvaluator,
        keywords: &'a KeywordScorer,
        effects: &'a EffectScorer,
    ) -> Self {
        Self {
            side,
            config,
            evaluator,
            keywords,
            effects,
        }
    }

    /// Run one card-play cycle against the host.
    pub fn run<H, P>(&self, host: &mut H, pacer: &mut P, rng: &mut DecisionRng) -> PlayReport
    where
        H: MatchView + Battlefield + SpellApplier + OngoingEffects,
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
            warn!(side = %self.side, "card play skipped: host not ready");
            return PlayReport::skip(SkipReason::NotReady);
        };

        if board.phase == Phase::Cleanup {
            return PlayReport::skip(SkipReason::WrongPhase);
        }
        if host.active_side() != self.side {
            return PlayReport::skip(SkipReason::NotOurTurn);
        }

        let posture = PostureClassifier::new(self.config.strategy.clone()).classify(&board, rng);
        debug!(side = %self.side, %posture, turn = board.turn, "planning card plays");

        let order = self.scored_order(host.hand(self.side), &board, host, rng);
        if order.is_empty() {
            let mut report = PlayReport::skip(SkipReason::NothingToDo);
            report.posture = Some(posture);
            return report;
        }

        let mut report = PlayReport {
            posture: Some(posture),
            ..PlayReport::default()
        };

        for (index, &(card_id, score)) in order.iter().enumerate() {
            let mana = host.mana(self.side);
            let cheapest = order[index..]
                .iter()
                .filter_map(|&(id, _)| card_cost(host.hand(self.side), id))
                .min();
            match cheapest {
                Some(cost) if mana >= cost => {}
                _ => break,
            }

            let Some(cost) = card_cost(host.hand(self.side), card_id) else {
                continue;
            };
            if cost > mana {
                continue;
            }

            pacer.pause(Pause::new(PauseKind::Evaluation, pacing.per_evaluation));

            match self.play_one(host, card_id, score) {
                Ok(Some(played)) => {
                    report.mana_spent += played.cost;
                    report.plays.push(played);
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(card = %card_id, %err, "card aborted");
                }
            }
        }

        debug!(
            side = %self.side,
            plays = report.plays.len(),
            mana_spent = report.mana_spent,
            "card plays complete"
        );
        report
    }

    /// Score, perturb, and order the legal cards in `hand`, best first.
    ///
    /// With a fixed-seed RNG the ordering is fully deterministic.
    #[must_use]
    pub fn decide_play_order<R: OngoingEffects>(
        &self,
        hand: &[Card],
        board: &BoardSnapshot,
        registry: &R,
        rng: &mut DecisionRng,
    ) -> Vec<CardId> {
        self.scored_order(hand, board, registry, rng)
            .into_iter()
            .map(|(id, _)| id)
            .collect()
    }

    fn scored_order<R: OngoingEffects>(
        &self,
        hand: &[Card],
        board: &BoardSnapshot,
        registry: &R,
        rng: &mut DecisionRng,
    ) -> Vec<(CardId, f32)> {
        let scorer = CardScorer::new(self.keywords, self.effects);
        let noise = &self.config.noise;

        let mut scored: Vec<(CardId, f32)> = hand
            .iter()
            .filter(|card| self.is_legal(card, board.phase))
            .map(|card| {
                let breakdown = scorer.score(card, board, registry);
                let mut total = breakdown.total();
                if rng.roll(noise.suboptimal_chance) {
                    total *= rng.uniform(noise.suboptimal_low, noise.suboptimal_high);
                }
                total *= rng.jitter(noise.score_variance);
                debug!(card = %card.name, score = total, %breakdown, "card scored");
                (card.id, total)
            })
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored
    }

    /// Which cards may be played right now.
    ///
    /// Monsters only enter during preparation. Spells need at least one
    /// effect, and during combat every effect must be damaging.
    fn is_legal(&self, card: &Card, phase: Phase) -> bool {
        match phase {
            Phase::Preparation => match &card.kind {
                CardKind::Monster { .. } => true,
                CardKind::Spell { effects } => !effects.is_empty(),
            },
            Phase::Combat => match &card.kind {
                CardKind::Monster { .. } => false,
                CardKind::Spell { effects } => {
                    !effects.is_empty()
                        && effects.iter().all(|e| self.effects.is_damaging(e.kind))
                }
            },
            Phase::Cleanup => false,
        }
    }

    /// Attempt one card. `Ok(None)` means the card was held back (no
    /// slot, no target, or already gone); only host failures are errors.
    fn play_one<H>(&self, host: &mut H, id: CardId, score: f32) -> Result<Option<PlayedCard>, HostError>
    where
        H: MatchView + Battlefield + SpellApplier + OngoingEffects,
    {
        let Some(card) = host.hand(self.side).iter().find(|c| c.id == id) else {
            return Ok(None);
        };

        match &card.kind {
            CardKind::Monster {
                attack,
                health,
                keywords,
            } => {
                let (attack, health, keywords) = (*attack, *health, *keywords);
                let cost = card.cost;
                let Some(slot) = placement::best_slot(host, self.side, attack, health, keywords)
                else {
                    debug!(card = %card.name, "no open slot; holding the card");
                    return Ok(None);
                };

                host.spend_mana(self.side, cost)?;
                let card = host.take_card(self.side, id)?;
                let unit = host.summon(self.side, slot, &card)?;
                debug!(card = %card.name, slot, %unit, "summoned");
                Ok(Some(PlayedCard {
                    card: card.id,
                    name: card.name,
                    cost,
                    score,
                    action: PlayAction::Summoned { slot, unit },
                }))
            }
            CardKind::Spell { effects } => {
                // Targets come from a fresh snapshot; earlier casts this
                // cycle may have changed what is worth hitting.
                let fresh = self
                    .evaluator
                    .evaluate(host, self.side)
                    .map_err(|_| HostError::Other("host became unavailable mid-phase".into()))?;

                let anchor = TargetRef::Icon(self.side);
                let mut targets: SmallVec<[TargetRef; 2]> = SmallVec::new();
                for effect in effects {
                    if self.effects.demands_target(effect.kind) {
                        match self.effects.best_target(effect, &fresh) {
                            Some(target) => targets.push(target),
                            None => {
                                debug!(
                                    card = %card.name,
                                    effect = %effect.kind,
                                    "no target; holding the card"
                                );
                                return Ok(None);
                            }
                        }
                    } else {
                        targets.push(anchor);
                    }
                }
                let reported = effects
                    .iter()
                    .zip(&targets)
                    .find(|(e, _)| self.effects.demands_target(e.kind))
                    .map_or(anchor, |(_, t)| *t);
                let cost = card.cost;

                host.spend_mana(self.side, cost)?;
                let card = host.take_card(self.side, id)?;
                for (effect, target) in card.effects().iter().zip(&targets) {
                    host.apply_effect(self.side, *effect, *target)?;
                }
                debug!(card = %card.name, target = %reported, "cast");
                Ok(Some(PlayedCard {
                    card: card.id,
                    name: card.name,
                    cost,
                    score,
                    action: PlayAction::Cast { target: reported },
                }))
            }
        }
    }
}

fn card_cost(hand: &[Card], id: CardId) -> Option<i32> {
    hand.iter().find(|c| c.id == id).map(|c| c.cost)
}
