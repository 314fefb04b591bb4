//! Aggro-or-defensive classification of a board snapshot.

use crate::board::BoardSnapshot;
use crate::config::StrategyConfig;
use crate::core::DecisionRng;

/// The stance the engine takes for one decision cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Posture {
    /// Press for damage: favor attacks, trades up, icon pressure.
    Aggro,
    /// Preserve the board: favor walls, healing, safe trades.
    Defensive,
}

impl std::fmt::Display for Posture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Posture::Aggro => write!(f, "aggro"),
            Posture::Defensive => write!(f, "defensive"),
        }
    }
}

/// Stateless classifier producing a [`Posture`] per cycle.
///
/// Clear advantage or a closing game forces Aggro; clear danger forces
/// Defensive; an even board falls to a weighted coin flip so identical
/// positions do not always play out the same way.
#[derive(Clone, Debug)]
pub struct PostureClassifier {
    config: StrategyConfig,
}

impl PostureClassifier {
    /// Create a classifier with the given thresholds.
    #[must_use]
    pub fn new(config: StrategyConfig) -> Self {
        Self { config }
    }

    /// Classify the acting side's stance on this board.
    pub fn classify(&self, board: &BoardSnapshot, rng: &mut DecisionRng) -> Posture {
        let own_health = board.own_icon().health;
        let foe_health = board.foe_icon().health;

        let pressing = own_health > foe_health + self.config.aggro_health_margin
            || board.own_control() > board.foe_control() * self.config.aggro_control_ratio
            || board.turn > self.config.aggro_turn
            || foe_health <= self.config.low_health;
        if pressing {
            return Posture::Aggro;
        }

        let endangered =
            own_health < self.config.low_health || board.foe_control() > board.own_control();
        if endangered {
            return Posture::Defensive;
        }

        if rng.roll(self.config.aggro_bias) {
            Posture::Aggro
        } else {
            Posture::Defensive
        }
    }
}
