//! Spell and ongoing effects.
//!
//! Effects are the payloads of spell cards. Instant kinds (Damage, Heal,
//! Draw, Bloodprice) resolve once; duration kinds (Burn, Shield) are
//! recorded by the host's ongoing-effect registry and tick down each round.
//! The engine only reads remaining durations when estimating value — it
//! never mutates them.

use serde::{Deserialize, Serialize};

/// The kind of a spell or ongoing effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Instant damage to one target.
    Damage,
    /// Damage over time; ticks each round for the remaining duration.
    Burn,
    /// Restore health to one target.
    Heal,
    /// Draw cards from the deck.
    Draw,
    /// Pay the caster's own health as part of the card's cost.
    Bloodprice,
    /// Absorb incoming damage on one target for the duration.
    Shield,
}

impl EffectKind {
    /// Every effect kind, in declaration order.
    pub const ALL: [EffectKind; 6] = [
        EffectKind::Damage,
        EffectKind::Burn,
        EffectKind::Heal,
        EffectKind::Draw,
        EffectKind::Bloodprice,
        EffectKind::Shield,
    ];
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EffectKind::Damage => "Damage",
            EffectKind::Burn => "Burn",
            EffectKind::Heal => "Heal",
            EffectKind::Draw => "Draw",
            EffectKind::Bloodprice => "Bloodprice",
            EffectKind::Shield => "Shield",
        };
        write!(f, "{name}")
    }
}

/// One effect carried by a spell card.
///
/// `value` is the per-application magnitude (damage dealt, health restored,
/// cards drawn, health paid). `duration` is the number of rounds an ongoing
/// effect persists; `None` for instants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub value: i32,
    pub duration: Option<u32>,
}

impl Effect {
    /// Create an instant effect.
    #[must_use]
    pub const fn instant(kind: EffectKind, value: i32) -> Self {
        Self {
            kind,
            value,
            duration: None,
        }
    }

    /// Create a duration effect lasting `rounds` rounds.
    #[must_use]
    pub const fn lasting(kind: EffectKind, value: i32, rounds: u32) -> Self {
        Self {
            kind,
            value,
            duration: Some(rounds),
        }
    }

    /// Instant damage.
    #[must_use]
    pub const fn damage(value: i32) -> Self {
        Self::instant(EffectKind::Damage, value)
    }

    /// Burn for `value` damage per round over `rounds` rounds.
    #[must_use]
    pub const fn burn(value: i32, rounds: u32) -> Self {
        Self::lasting(EffectKind::Burn, value, rounds)
    }

    /// Instant heal.
    #[must_use]
    pub const fn heal(value: i32) -> Self {
        Self::instant(EffectKind::Heal, value)
    }

    /// Draw `value` cards.
    #[must_use]
    pub const fn draw(value: i32) -> Self {
        Self::instant(EffectKind::Draw, value)
    }

    /// Pay `value` of the caster's health.
    #[must_use]
    pub const fn bloodprice(value: i32) -> Self {
        Self::instant(EffectKind::Bloodprice, value)
    }

    /// Shield absorbing `value` damage for `rounds` rounds.
    #[must_use]
    pub const fn shield(value: i32, rounds: u32) -> Self {
        Self::lasting(EffectKind::Shield, value, rounds)
    }
}

/// A currently-active ongoing effect on a unit, as reported by the host's
/// registry. Read-only to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: EffectKind,
    /// Per-round magnitude.
    pub value: i32,
    /// Rounds left, counting this one.
    pub remaining_rounds: u32,
}

impl ActiveEffect {
    /// Total damage this effect will still deal if left alone.
    ///
    /// Only meaningful for damaging kinds; callers gate on the kind.
    #[must_use]
    pub fn remaining_total(&self) -> i32 {
        self.value.saturating_mul(self.remaining_rounds as i32)
    }
}
