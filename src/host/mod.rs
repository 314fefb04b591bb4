//! Host interfaces: everything the engine needs from a battle system.
//!
//! The engine owns no game state. Health, mana, hands, units, ongoing
//! effects, and combat resolution all live with the host, reached through
//! the traits here. Scoring code performs pure reads; mutation happens
//! only through the narrow write methods (`spend_mana`, `take_card`,
//! `summon`, `apply_effect`, `resolve_attack`, `strike_icon`,
//! `register_attack`).
//!
//! [`BattleHost`] bundles the individual traits; any type implementing
//! all of them implements it automatically. [`sim::SimBattle`] is a
//! self-contained in-memory host used by the test suites.

pub mod sim;

use crate::core::{
    ActiveEffect, Card, CardId, Effect, EffectKind, FieldUnit, HealthIcon, Phase, Side, TargetRef,
    UnitId,
};
use crate::error::HostError;

pub use sim::SimBattle;

/// Turn, phase, resource, and hand state.
pub trait MatchView {
    /// Is the battle fully initialized and safe to inspect?
    fn ready(&self) -> bool;

    /// The current phase.
    fn phase(&self) -> Phase;

    /// The current turn count, starting at 1.
    fn turn(&self) -> u32;

    /// Whose turn it currently is.
    fn active_side(&self) -> Side;

    /// Which side acts first on the next turn.
    fn first_next_turn(&self) -> Side;

    /// A side's health icon.
    fn icon(&self, side: Side) -> HealthIcon;

    /// A side's current mana.
    fn mana(&self, side: Side) -> i32;

    /// Deduct mana from a side's pool.
    fn spend_mana(&mut self, side: Side, amount: i32) -> Result<(), HostError>;

    /// A side's hand. The engine only ever reads the acting side's cards;
    /// for the opposing side it looks at [`MatchView::hand_size`] alone.
    fn hand(&self, side: Side) -> &[Card];

    /// Number of cards in a side's hand.
    fn hand_size(&self, side: Side) -> usize {
        self.hand(side).len()
    }

    /// Maximum hand size the host enforces.
    fn hand_limit(&self, side: Side) -> usize;

    /// Remove a card from a side's hand, consuming it.
    fn take_card(&mut self, side: Side, id: CardId) -> Result<Card, HostError>;
}

/// Board slots and the units occupying them.
pub trait Battlefield {
    /// Number of board slots on a side.
    fn slot_count(&self, side: Side) -> usize;

    /// The unit occupying a slot, if any.
    fn unit_at(&self, side: Side, slot: usize) -> Option<&FieldUnit>;

    /// Summon a monster card's unit into an open slot.
    fn summon(&mut self, side: Side, slot: usize, card: &Card) -> Result<UnitId, HostError>;
}

/// Tracks which units have attacks remaining this turn.
pub trait AttackLimiter {
    /// May this unit still attack this turn?
    fn can_attack(&self, id: UnitId) -> bool;

    /// Record that the unit has spent an attack.
    fn register_attack(&mut self, id: UnitId);

    /// Restore the unit's attacks (start of turn, or an untap effect).
    fn reset_attacks(&mut self, id: UnitId);
}

/// Applies resolved spell effects and records their durations.
pub trait SpellApplier {
    /// Apply one effect from `caster` onto `target`.
    fn apply_effect(
        &mut self,
        caster: Side,
        effect: Effect,
        target: TargetRef,
    ) -> Result<(), HostError>;
}

/// Read-only registry of ongoing effects.
pub trait OngoingEffects {
    /// All ongoing effects currently attached to a target.
    fn active_effects(&self, target: TargetRef) -> Vec<ActiveEffect>;

    /// Does the target currently carry an effect of this kind?
    fn carries(&self, target: TargetRef, kind: EffectKind) -> bool {
        self.active_effects(target).iter().any(|e| e.kind == kind)
    }

    /// Total burn damage still scheduled against a target.
    fn pending_burn(&self, target: TargetRef) -> i32 {
        self.active_effects(target)
            .iter()
            .filter(|e| e.kind == EffectKind::Burn)
            .map(ActiveEffect::remaining_total)
            .fold(0i32, i32::saturating_add)
    }
}

/// What an attack did to its participants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackOutcome {
    pub target_killed: bool,
    pub attacker_killed: bool,
}

/// What a direct icon strike did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IconOutcome {
    pub damage_dealt: i32,
    pub icon_destroyed: bool,
}

/// Resolves attacks, including counter-attacks and splash damage.
pub trait CombatResolver {
    /// Resolve a unit-versus-unit attack.
    fn resolve_attack(&mut self, attacker: UnitId, target: UnitId)
        -> Result<AttackOutcome, HostError>;

    /// Strike a side's health icon directly.
    fn strike_icon(&mut self, attacker: UnitId, side: Side) -> Result<IconOutcome, HostError>;
}

/// The full host surface the engine drives.
pub trait BattleHost:
    MatchView + Battlefield + AttackLimiter + SpellApplier + OngoingEffects + CombatResolver
{
}

impl<T> BattleHost for T where
    T: MatchView + Battlefield + AttackLimiter + SpellApplier + OngoingEffects + CombatResolver
{
}
