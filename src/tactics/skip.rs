//! The decision to hold an attack instead of swinging.

use tracing::debug;

use crate::board::BoardSnapshot;
use crate::config::StrategyConfig;
use crate::core::DecisionRng;
use crate::tactics::Posture;

/// Recommends withholding the attack when sitting on a lead is safer.
///
/// Skipping is rare by construction: it needs a consider roll to pass, a
/// defensive posture, an early-enough turn, a healthy opponent (no point
/// holding back a finishable one), and a clear board-control lead. Even
/// then the final roll can decline.
#[derive(Clone, Debug)]
pub struct SkipAdvisor {
    config: StrategyConfig,
}

impl SkipAdvisor {
    /// Create an advisor with the given thresholds.
    #[must_use]
    pub fn new(config: StrategyConfig) -> Self {
        Self { config }
    }

    /// Should the acting side hold its attack this cycle?
    ///
    /// Never true while the opponent's board is empty; a free icon hit is
    /// always taken.
    pub fn should_skip(
        &self,
        board: &BoardSnapshot,
        posture: Posture,
        rng: &mut DecisionRng,
    ) -> bool {
        if board.foe_units().is_empty() {
            return false;
        }
        if !rng.roll(self.config.skip_consider_chance) {
            return false;
        }
        if posture != Posture::Defensive {
            return false;
        }
        if board.turn >= self.config.skip_turn_cutoff {
            return false;
        }
        if board.foe_icon().health <= self.config.skip_foe_health_floor {
            return false;
        }

        let ratio = board.own_control() / board.foe_control().max(1.0);
        if ratio <= self.config.skip_control_ratio {
            return false;
        }

        let lead = f64::from(ratio - self.config.skip_control_ratio);
        let mut chance = (self.config.skip_base_chance + self.config.skip_ratio_step * lead)
            .min(self.config.skip_chance_cap);
        if board.foe_first_next_turn() {
            chance += self.config.skip_foe_first_bonus;
        }
        let skip = rng.roll(chance);
        if skip {
            debug!(ratio, chance, "holding the attack");
        }
        skip
    }
}
