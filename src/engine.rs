//! The opponent controller: one object per battle, driving both phases.
//!
//! ## Usage
//!
//! ```
//! use duelmind::core::{Card, CardId, KeywordSet, Side};
//! use duelmind::host::{MatchView, SimBattle};
//! use duelmind::pacing::InstantPacer;
//! use duelmind::{EngineConfig, OpponentController};
//!
//! let mut host = SimBattle::new()
//!     .with_active_side(Side::Enemy)
//!     .with_mana(Side::Enemy, 3)
//!     .with_card(
//!         Side::Enemy,
//!         Card::monster(CardId::new(1), "Grunt", 2, 4, 2, KeywordSet::new()),
//!     );
//!
//! let mut controller =
//!     OpponentController::new(Side::Enemy, EngineConfig::default()).with_seed(7);
//! let report = controller.play_cards(&mut host, &mut InstantPacer);
//!
//! assert_eq!(report.plays.len(), 1);
//! assert_eq!(host.mana(Side::Enemy), 1);
//! ```
//!
//! The controller owns the RNG and the scorers; each phase call forks a
//! fresh decision stream, so replaying a battle with the same seed and
//! the same host states reproduces every choice.

use crate::board::{BoardEvaluator, BoardSnapshot};
use crate::combat::{AttackDirector, AttackReport};
use crate::config::EngineConfig;
use crate::core::{DecisionRng, Side};
use crate::error::SnapshotError;
use crate::host::{
    AttackLimiter, Battlefield, CombatResolver, MatchView, OngoingEffects, SpellApplier,
};
use crate::pacing::Pacer;
use crate::play::{PlayDirector, PlayReport};
use crate::scoring::{EffectScorer, KeywordScorer};

/// A heuristic opponent for one side of a battle.
///
/// Construct once per battle and call [`OpponentController::play_cards`]
/// during preparation and [`OpponentController::attack`] during combat.
/// Both are safe to call at any time; they no-op with a reason when the
/// host is not in a state they can act on.
pub struct OpponentController {
    side: Side,
    config: EngineConfig,
    rng: DecisionRng,
    evaluator: BoardEvaluator,
    keyword_scorer: KeywordScorer,
    effect_scorer: EffectScorer,
}

impl OpponentController {
    /// Create a controller for `side`.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails validation (probabilities out of range).
    #[must_use]
    pub fn new(side: Side, config: EngineConfig) -> Self {
        config.validate();
        let evaluator = BoardEvaluator::new(config.evaluation.clone());
        let keyword_scorer = KeywordScorer::new(config.keywords.clone());
        let effect_scorer = EffectScorer::new(config.effects.clone());
        Self {
            side,
            config,
            rng: DecisionRng::from_entropy(),
            evaluator,
            keyword_scorer,
            effect_scorer,
        }
    }

    /// Replace the decision RNG with a fixed-seed stream.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = DecisionRng::new(seed);
        self
    }

    /// The side this controller plays.
    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// The configuration the controller was built with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Snapshot the battle from this controller's perspective.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::NotReady`] while the host is warming up.
    pub fn snapshot<H>(&self, host: &H) -> Result<BoardSnapshot, SnapshotError>
    where
        H: MatchView + Battlefield + OngoingEffects,
    {
        self.evaluator.evaluate(host, self.side)
    }

    /// Run one card-play cycle.
    pub fn play_cards<H, P>(&mut self, host: &mut H, pacer: &mut P) -> PlayReport
    where
        H: MatchView + Battlefield + SpellApplier + OngoingEffects,
        P: Pacer + ?Sized,
    {
        let mut rng = self.rng.fork();
        PlayDirector::new(
            self.side,
            &self.config,
            &self.evaluator,
            &self.keyword_scorer,
            &self.effect_scorer,
        )
        .run(host, pacer, &mut rng)
    }

    /// Run one attack cycle.
    pub fn attack<H, P>(&mut self, host: &mut H, pacer: &mut P) -> AttackReport
    where
        H: MatchView + Battlefield + OngoingEffects + AttackLimiter + CombatResolver,
        P: Pacer + ?Sized,
    {
        let mut rng = self.rng.fork();
        AttackDirector::new(self.side, &self.config, &self.evaluator, &self.keyword_scorer)
            .run(host, pacer, &mut rng)
    }
}

impl std::fmt::Debug for OpponentController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpponentController")
            .field("side", &self.side)
            .field("seed", &self.rng.seed())
            .finish_non_exhaustive()
    }
}
