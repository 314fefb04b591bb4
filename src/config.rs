//! Engine configuration: every tuning constant, named.
//!
//! The heuristics lean on a pile of numeric weights. None of them were
//! derived from first principles; they are play-tested values, so they are
//! exposed here as plain fields rather than buried in the scorers. Change
//! them deliberately or not at all.
//!
//! ## Example
//!
//! ```
//! use duelmind::config::EngineConfig;
//!
//! let config = EngineConfig::default()
//!     .with_aggro_bias(0.8)
//!     .with_score_variance(0.0);
//! assert_eq!(config.noise.score_variance, 0.0);
//! ```

use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{EffectKind, Keyword};

/// Whether a keyword mostly protects its owner or mostly presses an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeywordRole {
    Offensive,
    Defensive,
}

/// Scoring profile for one keyword.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeywordProfile {
    /// Base tactical value.
    pub value: f32,
    /// Role, used for situational bonuses.
    pub role: KeywordRole,
}

impl KeywordProfile {
    /// Create a profile.
    #[must_use]
    pub const fn new(value: f32, role: KeywordRole) -> Self {
        Self { value, role }
    }

    /// Default profile table for the known keyword set.
    #[must_use]
    pub fn default_table() -> FxHashMap<Keyword, KeywordProfile> {
        let mut table = FxHashMap::default();
        table.insert(Keyword::Taunt, Self::new(30.0, KeywordRole::Defensive));
        table.insert(Keyword::Ranged, Self::new(25.0, KeywordRole::Offensive));
        table.insert(Keyword::Tough, Self::new(20.0, KeywordRole::Defensive));
        table.insert(Keyword::Overwhelm, Self::new(35.0, KeywordRole::Offensive));
        table
    }
}

/// Scoring profile for one effect kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectProfile {
    /// Base value. Negative for self-harming effects.
    pub base: f32,
    /// Does this effect benefit the side that owns it?
    pub positive: bool,
    /// Does applying it again to the same target compound?
    pub stackable: bool,
    /// Must it land on a unit or icon to resolve?
    pub requires_target: bool,
    /// Does it remove health from its target?
    pub damaging: bool,
}

impl EffectProfile {
    /// Default profile table for the known effect kinds.
    #[must_use]
    pub fn default_table() -> FxHashMap<EffectKind, EffectProfile> {
        let mut table = FxHashMap::default();
        table.insert(
            EffectKind::Damage,
            Self {
                base: 40.0,
                positive: true,
                stackable: false,
                requires_target: true,
                damaging: true,
            },
        );
        table.insert(
            EffectKind::Burn,
            Self {
                base: 30.0,
                positive: true,
                stackable: true,
                requires_target: true,
                damaging: true,
            },
        );
        table.insert(
            EffectKind::Heal,
            Self {
                base: 35.0,
                positive: true,
                stackable: false,
                requires_target: true,
                damaging: false,
            },
        );
        table.insert(
            EffectKind::Draw,
            Self {
                base: 25.0,
                positive: true,
                stackable: false,
                requires_target: false,
                damaging: false,
            },
        );
        table.insert(
            EffectKind::Bloodprice,
            Self {
                base: -20.0,
                positive: false,
                stackable: false,
                requires_target: false,
                damaging: false,
            },
        );
        table.insert(
            EffectKind::Shield,
            Self {
                base: 25.0,
                positive: true,
                stackable: true,
                requires_target: true,
                damaging: false,
            },
        );
        table
    }
}

/// Board-control evaluation weights.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Control multiplier for units with Taunt (default 1.3).
    pub taunt_control_mult: f32,
    /// Control multiplier for units with Ranged (default 1.2).
    pub ranged_control_mult: f32,
    /// Discount applied to pending burn damage (default 0.8).
    pub burn_discount: f32,
    /// Weight of icon health in a side's control total (default 0.2).
    pub icon_health_weight: f32,
    /// Turn after which the late-game multiplier kicks in (default 10).
    pub late_game_turn: u32,
    /// Late-game control multiplier for the acting side (default 1.1).
    pub late_game_mult: f32,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            taunt_control_mult: 1.3,
            ranged_control_mult: 1.2,
            burn_discount: 0.8,
            icon_health_weight: 0.2,
            late_game_turn: 10,
            late_game_mult: 1.1,
        }
    }
}

/// Posture classification and turn-skip thresholds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Health lead that forces Aggro (default 10).
    pub aggro_health_margin: i32,
    /// Control ratio over the opponent that forces Aggro (default 1.3).
    pub aggro_control_ratio: f32,
    /// Turn after which Aggro is forced (default 8).
    pub aggro_turn: u32,
    /// Icon health at or below which a side counts as low (default 15).
    pub low_health: i32,
    /// Probability of Aggro when no rule decides (default 0.6).
    pub aggro_bias: f64,

    /// Probability of even considering a skip (default 0.25).
    pub skip_consider_chance: f64,
    /// Minimum own/opponent control ratio to skip (default 1.6).
    pub skip_control_ratio: f32,
    /// No skipping at or past this turn (default 12).
    pub skip_turn_cutoff: u32,
    /// No skipping while the opponent icon is at or below this (default 10).
    pub skip_foe_health_floor: i32,
    /// Base skip probability once all gates pass (default 0.35).
    pub skip_base_chance: f64,
    /// Extra skip probability per point of ratio beyond the gate (default 0.15).
    pub skip_ratio_step: f64,
    /// Hard ceiling on skip probability (default 0.9).
    pub skip_chance_cap: f64,
    /// Bonus when the opponent acts first next turn (default 0.2).
    pub skip_foe_first_bonus: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            aggro_health_margin: 10,
            aggro_control_ratio: 1.3,
            aggro_turn: 8,
            low_health: 15,
            aggro_bias: 0.6,
            skip_consider_chance: 0.25,
            skip_control_ratio: 1.6,
            skip_turn_cutoff: 12,
            skip_foe_health_floor: 10,
            skip_base_chance: 0.35,
            skip_ratio_step: 0.15,
            skip_chance_cap: 0.9,
            skip_foe_first_bonus: 0.2,
        }
    }
}

/// Deliberate imperfection, so play never looks solved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Probability a card score is deliberately dampened (default 0.15).
    pub suboptimal_chance: f64,
    /// Dampening range lower bound (default 0.5).
    pub suboptimal_low: f32,
    /// Dampening range upper bound (default 0.8).
    pub suboptimal_high: f32,
    /// Symmetric multiplicative jitter on every score (default 0.1).
    pub score_variance: f32,
    /// Probability of swapping an adjacent attacker pair (default 0.1).
    pub shuffle_chance: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            suboptimal_chance: 0.15,
            suboptimal_low: 0.5,
            suboptimal_high: 0.8,
            score_variance: 0.1,
            shuffle_chance: 0.1,
        }
    }
}

/// Suggested pause durations for each pacing beat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Before the first decision of a cycle (default 900ms).
    pub phase_start: Duration,
    /// After each card or board evaluation (default 350ms).
    pub per_evaluation: Duration,
    /// Between consecutive attacks, before jitter (default 650ms).
    pub per_attack: Duration,
    /// Multiplicative jitter applied to `per_attack` (default 0.3).
    pub attack_jitter: f32,
    /// Extra pause after a killing blow (default 600ms).
    pub after_kill: Duration,
    /// Extra pause after striking a health icon (default 800ms).
    pub icon_hit: Duration,
    /// Placeholder pause when the battle is not ready (default 400ms).
    pub unavailable: Duration,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            phase_start: Duration::from_millis(900),
            per_evaluation: Duration::from_millis(350),
            per_attack: Duration::from_millis(650),
            attack_jitter: 0.3,
            after_kill: Duration::from_millis(600),
            icon_hit: Duration::from_millis(800),
            unavailable: Duration::from_millis(400),
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    pub evaluation: EvaluationConfig,
    pub strategy: StrategyConfig,
    pub noise: NoiseConfig,
    pub pacing: PacingConfig,
    /// Keyword scoring profiles. A keyword missing from this table scores
    /// zero and logs one warning.
    pub keywords: FxHashMap<Keyword, KeywordProfile>,
    /// Effect scoring profiles. Same miss behavior as `keywords`.
    pub effects: FxHashMap<EffectKind, EffectProfile>,
    /// How many times to poll for a snapshot before skipping the cycle
    /// (default 3).
    pub snapshot_attempts: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            evaluation: EvaluationConfig::default(),
            strategy: StrategyConfig::default(),
            noise: NoiseConfig::default(),
            pacing: PacingConfig::default(),
            keywords: KeywordProfile::default_table(),
            effects: EffectProfile::default_table(),
            snapshot_attempts: 3,
        }
    }
}

impl EngineConfig {
    /// Set the Aggro coin-flip bias.
    #[must_use]
    pub fn with_aggro_bias(mut self, bias: f64) -> Self {
        self.strategy.aggro_bias = bias;
        self
    }

    /// Set the score jitter range.
    #[must_use]
    pub fn with_score_variance(mut self, variance: f32) -> Self {
        self.noise.score_variance = variance;
        self
    }

    /// Set the suboptimal-play probability.
    #[must_use]
    pub fn with_suboptimal_chance(mut self, chance: f64) -> Self {
        self.noise.suboptimal_chance = chance;
        self
    }

    /// Replace the profile for one keyword.
    #[must_use]
    pub fn with_keyword_profile(mut self, keyword: Keyword, profile: KeywordProfile) -> Self {
        self.keywords.insert(keyword, profile);
        self
    }

    /// Replace the profile for one effect kind.
    #[must_use]
    pub fn with_effect_profile(mut self, kind: EffectKind, profile: EffectProfile) -> Self {
        self.effects.insert(kind, profile);
        self
    }

    /// Zero out every pause. Used by headless hosts and most tests.
    #[must_use]
    pub fn without_pacing(mut self) -> Self {
        self.pacing = PacingConfig {
            phase_start: Duration::ZERO,
            per_evaluation: Duration::ZERO,
            per_attack: Duration::ZERO,
            attack_jitter: 0.0,
            after_kill: Duration::ZERO,
            icon_hit: Duration::ZERO,
            unavailable: Duration::ZERO,
        };
        self
    }

    /// Remove all decision noise. Play becomes deterministic apart from
    /// the posture coin flip.
    #[must_use]
    pub fn without_noise(mut self) -> Self {
        self.noise = NoiseConfig {
            suboptimal_chance: 0.0,
            suboptimal_low: 1.0,
            suboptimal_high: 1.0,
            score_variance: 0.0,
            shuffle_chance: 0.0,
        };
        self
    }

    /// Panics if any probability or multiplier is out of range.
    pub fn validate(&self) {
        assert!(
            (0.0..=1.0).contains(&self.noise.suboptimal_chance),
            "suboptimal_chance must be a probability"
        );
        assert!(
            (0.0..=1.0).contains(&self.noise.shuffle_chance),
            "shuffle_chance must be a probability"
        );
        assert!(
            (0.0..=1.0).contains(&self.strategy.aggro_bias),
            "aggro_bias must be a probability"
        );
        assert!(
            (0.0..=1.0).contains(&self.strategy.skip_consider_chance),
            "skip_consider_chance must be a probability"
        );
        assert!(
            self.noise.score_variance >= 0.0 && self.noise.score_variance < 1.0,
            "score_variance must be in [0, 1)"
        );
        assert!(self.snapshot_attempts > 0, "snapshot_attempts must be positive");
    }
}
