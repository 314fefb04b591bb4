//! A self-contained in-memory battle host.
//!
//! `SimBattle` implements every host trait with straightforward rules:
//! Tough halves incoming damage (rounding up), shields absorb what is
//! left and deplete, Overwhelm splashes half the attack into the other
//! defenders, and non-Ranged attackers eat a counter-attack from a
//! surviving target. It exists so the engine can be exercised end to end
//! without a real game attached; the integration suites build all their
//! fixtures on it.
//!
//! ## Example
//!
//! ```
//! use duelmind::core::{FieldUnit, KeywordSet, Side, UnitId};
//! use duelmind::host::{MatchView, SimBattle};
//!
//! let battle = SimBattle::new()
//!     .with_mana(Side::Enemy, 5)
//!     .with_unit(Side::Player, 0, FieldUnit::new(UnitId::new(1), 2, 3, KeywordSet::new()));
//! assert_eq!(battle.mana(Side::Enemy), 5);
//! ```

use rustc_hash::FxHashMap;

use crate::core::{
    ActiveEffect, Card, CardId, CardKind, Effect, EffectKind, FieldUnit, HealthIcon, Keyword,
    Phase, Side, TargetRef, UnitId,
};
use crate::error::HostError;
use crate::host::{
    AttackLimiter, AttackOutcome, Battlefield, CombatResolver, IconOutcome, MatchView,
    OngoingEffects, SpellApplier,
};

const DEFAULT_SLOTS: usize = 5;
const DEFAULT_ICON_HEALTH: i32 = 30;
const DEFAULT_HAND_LIMIT: usize = 10;

fn idx(side: Side) -> usize {
    match side {
        Side::Player => 0,
        Side::Enemy => 1,
    }
}

/// In-memory host implementing the full [`BattleHost`](crate::host::BattleHost) surface.
#[derive(Clone, Debug)]
pub struct SimBattle {
    ready: bool,
    phase: Phase,
    turn: u32,
    active_side: Side,
    first_next_turn: Side,
    icons: [HealthIcon; 2],
    mana: [i32; 2],
    hands: [Vec<Card>; 2],
    hand_limits: [usize; 2],
    slots: [Vec<Option<FieldUnit>>; 2],
    spent_attacks: Vec<UnitId>,
    effects: FxHashMap<TargetRef, Vec<ActiveEffect>>,
    fallen: Vec<UnitId>,
    next_unit_id: u32,
    next_card_id: u32,
}

impl SimBattle {
    /// A fresh battle: ready, preparation phase, turn 1, empty five-slot
    /// boards, both icons at 30, no mana, empty hands.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ready: true,
            phase: Phase::Preparation,
            turn: 1,
            active_side: Side::Player,
            first_next_turn: Side::Player,
            icons: [
                HealthIcon {
                    side: Side::Player,
                    health: DEFAULT_ICON_HEALTH,
                    max_health: DEFAULT_ICON_HEALTH,
                },
                HealthIcon {
                    side: Side::Enemy,
                    health: DEFAULT_ICON_HEALTH,
                    max_health: DEFAULT_ICON_HEALTH,
                },
            ],
            mana: [0, 0],
            hands: [Vec::new(), Vec::new()],
            hand_limits: [DEFAULT_HAND_LIMIT, DEFAULT_HAND_LIMIT],
            slots: [
                vec![None; DEFAULT_SLOTS],
                vec![None; DEFAULT_SLOTS],
            ],
            spent_attacks: Vec::new(),
            effects: FxHashMap::default(),
            fallen: Vec::new(),
            next_unit_id: 1,
            next_card_id: 1,
        }
    }

    // === Builders ===

    /// Mark the battle ready or not.
    #[must_use]
    pub fn with_ready(mut self, ready: bool) -> Self {
        self.ready = ready;
        self
    }

    /// Set the phase.
    #[must_use]
    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }

    /// Set the turn count.
    #[must_use]
    pub fn with_turn(mut self, turn: u32) -> Self {
        self.turn = turn;
        self
    }

    /// Set whose turn it is.
    #[must_use]
    pub fn with_active_side(mut self, side: Side) -> Self {
        self.active_side = side;
        self
    }

    /// Set which side acts first next turn.
    #[must_use]
    pub fn with_first_next_turn(mut self, side: Side) -> Self {
        self.first_next_turn = side;
        self
    }

    /// Set a side's icon health.
    #[must_use]
    pub fn with_icon(mut self, side: Side, health: i32, max_health: i32) -> Self {
        self.icons[idx(side)] = HealthIcon {
            side,
            health,
            max_health,
        };
        self
    }

    /// Set a side's mana pool.
    #[must_use]
    pub fn with_mana(mut self, side: Side, mana: i32) -> Self {
        self.mana[idx(side)] = mana;
        self
    }

    /// Set a side's hand limit.
    #[must_use]
    pub fn with_hand_limit(mut self, side: Side, limit: usize) -> Self {
        self.hand_limits[idx(side)] = limit;
        self
    }

    /// Resize both boards to `count` slots per side.
    #[must_use]
    pub fn with_slot_count(mut self, count: usize) -> Self {
        for board in &mut self.slots {
            board.resize(count, None);
        }
        self
    }

    /// Put a card into a side's hand.
    #[must_use]
    pub fn with_card(mut self, side: Side, card: Card) -> Self {
        self.next_card_id = self.next_card_id.max(card.id.raw() + 1);
        self.hands[idx(side)].push(card);
        self
    }

    /// Place a unit into a specific slot.
    ///
    /// # Panics
    ///
    /// Panics if the slot is out of range or already occupied.
    #[must_use]
    pub fn with_unit(mut self, side: Side, slot: usize, unit: FieldUnit) -> Self {
        let board = &mut self.slots[idx(side)];
        assert!(slot < board.len(), "slot {slot} out of range");
        assert!(board[slot].is_none(), "slot {slot} already occupied");
        self.next_unit_id = self.next_unit_id.max(unit.id.raw() + 1);
        board[slot] = Some(unit);
        self
    }

    /// Attach an ongoing effect to a target.
    #[must_use]
    pub fn with_ongoing(mut self, target: TargetRef, effect: ActiveEffect) -> Self {
        self.effects.entry(target).or_default().push(effect);
        self
    }

    // === Mutators used by multi-step tests ===

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub fn set_active_side(&mut self, side: Side) {
        self.active_side = side;
    }

    // === Inspection helpers ===

    /// Look up a living unit by ID.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&FieldUnit> {
        self.slots
            .iter()
            .flatten()
            .flatten()
            .find(|u| u.id == id)
    }

    /// IDs of units that have died, in death order.
    #[must_use]
    pub fn fallen(&self) -> &[UnitId] {
        &self.fallen
    }

    fn locate(&self, id: UnitId) -> Option<(usize, usize)> {
        for (s, board) in self.slots.iter().enumerate() {
            for (slot, occupant) in board.iter().enumerate() {
                if occupant.as_ref().is_some_and(|u| u.id == id) {
                    return Some((s, slot));
                }
            }
        }
        None
    }

    fn side_of(&self, id: UnitId) -> Option<Side> {
        self.locate(id)
            .map(|(s, _)| if s == 0 { Side::Player } else { Side::Enemy })
    }

    /// Shields absorb damage and deplete; exhausted shields drop off.
    fn absorb_with_shields(&mut self, target: TargetRef, mut damage: i32) -> i32 {
        if let Some(actives) = self.effects.get_mut(&target) {
            for effect in actives.iter_mut() {
                if effect.kind != EffectKind::Shield || damage == 0 {
                    continue;
                }
                let absorbed = damage.min(effect.value);
                effect.value -= absorbed;
                damage -= absorbed;
            }
            actives.retain(|e| !(e.kind == EffectKind::Shield && e.value <= 0));
        }
        damage
    }

    /// Apply `raw` damage to a unit. Tough halves first, shields absorb
    /// the remainder. Returns true if the unit died.
    fn deal_damage(&mut self, id: UnitId, raw: i32) -> bool {
        let Some((s, slot)) = self.locate(id) else {
            return false;
        };
        let tough = self.slots[s][slot]
            .as_ref()
            .is_some_and(|u| u.keywords.contains(Keyword::Tough));
        let halved = if tough { (raw + 1) / 2 } else { raw };
        let net = self.absorb_with_shields(TargetRef::Unit(id), halved.max(0));

        let Some(unit) = self.slots[s][slot].as_mut() else {
            return false;
        };
        unit.health -= net;
        if unit.health <= 0 {
            unit.health = 0;
            unit.dead = true;
            self.slots[s][slot] = None;
            self.fallen.push(id);
            self.effects.remove(&TargetRef::Unit(id));
            self.spent_attacks.retain(|a| *a != id);
            true
        } else {
            false
        }
    }

    fn damage_icon(&mut self, side: Side, amount: i32) -> IconOutcome {
        let icon = &mut self.icons[idx(side)];
        let dealt = amount.max(0);
        icon.health = (icon.health - dealt).max(0);
        IconOutcome {
            damage_dealt: dealt,
            icon_destroyed: icon.health == 0,
        }
    }

    fn draw_filler(&mut self, side: Side, count: i32) {
        for _ in 0..count.max(0) {
            if self.hands[idx(side)].len() >= self.hand_limits[idx(side)] {
                break;
            }
            let id = CardId::new(self.next_card_id);
            self.next_card_id += 1;
            self.hands[idx(side)].push(Card::monster(
                id,
                "Drawn Card",
                1,
                1,
                1,
                crate::core::KeywordSet::new(),
            ));
        }
    }
}

impl Default for SimBattle {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchView for SimBattle {
    fn ready(&self) -> bool {
        self.ready
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn turn(&self) -> u32 {
        self.turn
    }

    fn active_side(&self) -> Side {
        self.active_side
    }

    fn first_next_turn(&self) -> Side {
        self.first_next_turn
    }

    fn icon(&self, side: Side) -> HealthIcon {
        self.icons[idx(side)]
    }

    fn mana(&self, side: Side) -> i32 {
        self.mana[idx(side)]
    }

    fn spend_mana(&mut self, side: Side, amount: i32) -> Result<(), HostError> {
        if self.mana[idx(side)] < amount {
            return Err(HostError::Other(format!(
                "insufficient mana: have {}, need {amount}",
                self.mana[idx(side)]
            )));
        }
        self.mana[idx(side)] -= amount;
        Ok(())
    }

    fn hand(&self, side: Side) -> &[Card] {
        &self.hands[idx(side)]
    }

    fn hand_limit(&self, side: Side) -> usize {
        self.hand_limits[idx(side)]
    }

    fn take_card(&mut self, side: Side, id: CardId) -> Result<Card, HostError> {
        let hand = &mut self.hands[idx(side)];
        let position = hand
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| HostError::CardRejected(id.raw(), "not in hand".into()))?;
        Ok(hand.remove(position))
    }
}

impl Battlefield for SimBattle {
    fn slot_count(&self, side: Side) -> usize {
        self.slots[idx(side)].len()
    }

    fn unit_at(&self, side: Side, slot: usize) -> Option<&FieldUnit> {
        self.slots[idx(side)].get(slot)?.as_ref()
    }

    fn summon(&mut self, side: Side, slot: usize, card: &Card) -> Result<UnitId, HostError> {
        let CardKind::Monster {
            attack,
            health,
            keywords,
        } = card.kind
        else {
            return Err(HostError::Other(format!("{} is not a monster", card.id)));
        };
        let board = &mut self.slots[idx(side)];
        if slot >= board.len() || board[slot].is_some() {
            return Err(HostError::BoardFull);
        }
        let id = UnitId::new(self.next_unit_id);
        self.next_unit_id += 1;
        board[slot] = Some(FieldUnit::new(id, attack, health, keywords));
        Ok(id)
    }
}

impl AttackLimiter for SimBattle {
    fn can_attack(&self, id: UnitId) -> bool {
        !self.spent_attacks.contains(&id)
    }

    fn register_attack(&mut self, id: UnitId) {
        if self.can_attack(id) {
            self.spent_attacks.push(id);
        }
    }

    fn reset_attacks(&mut self, id: UnitId) {
        self.spent_attacks.retain(|a| *a != id);
    }
}

impl SpellApplier for SimBattle {
    fn apply_effect(
        &mut self,
        caster: Side,
        effect: Effect,
        target: TargetRef,
    ) -> Result<(), HostError> {
        match effect.kind {
            EffectKind::Damage => match target {
                TargetRef::Unit(id) => {
                    if self.locate(id).is_none() {
                        return Err(HostError::Other(format!("{id} not on the board")));
                    }
                    self.deal_damage(id, effect.value);
                }
                TargetRef::Icon(side) => {
                    self.damage_icon(side, effect.value);
                }
            },
            EffectKind::Burn | EffectKind::Shield => {
                if let TargetRef::Unit(id) = target {
                    if self.locate(id).is_none() {
                        return Err(HostError::Other(format!("{id} not on the board")));
                    }
                }
                self.effects.entry(target).or_default().push(ActiveEffect {
                    kind: effect.kind,
                    value: effect.value,
                    remaining_rounds: effect.duration.unwrap_or(1),
                });
            }
            EffectKind::Heal => match target {
                TargetRef::Unit(id) => {
                    let Some((s, slot)) = self.locate(id) else {
                        return Err(HostError::Other(format!("{id} not on the board")));
                    };
                    if let Some(unit) = self.slots[s][slot].as_mut() {
                        unit.health = (unit.health + effect.value).min(unit.max_health);
                    }
                }
                TargetRef::Icon(side) => {
                    let icon = &mut self.icons[idx(side)];
                    icon.health = (icon.health + effect.value).min(icon.max_health);
                }
            },
            EffectKind::Draw => self.draw_filler(caster, effect.value),
            EffectKind::Bloodprice => {
                self.damage_icon(caster, effect.value);
            }
        }
        Ok(())
    }
}

impl OngoingEffects for SimBattle {
    fn active_effects(&self, target: TargetRef) -> Vec<ActiveEffect> {
        self.effects.get(&target).cloned().unwrap_or_default()
    }
}

impl CombatResolver for SimBattle {
    fn resolve_attack(
        &mut self,
        attacker: UnitId,
        target: UnitId,
    ) -> Result<AttackOutcome, HostError> {
        let attacker_unit = self
            .unit(attacker)
            .ok_or_else(|| HostError::AttackRejected(format!("{attacker} not on the board")))?
            .clone();
        let target_side = self
            .side_of(target)
            .ok_or_else(|| HostError::AttackRejected(format!("{target} not on the board")))?;

        let target_killed = self.deal_damage(target, attacker_unit.attack);

        // Splash hits every other defender on the target's side.
        if attacker_unit.keywords.contains(Keyword::Overwhelm) {
            let splash = attacker_unit.attack / 2;
            if splash > 0 {
                let others: Vec<UnitId> = self.slots[idx(target_side)]
                    .iter()
                    .flatten()
                    .filter(|u| u.id != target)
                    .map(|u| u.id)
                    .collect();
                for other in others {
                    self.deal_damage(other, splash);
                }
            }
        }

        // Survivors strike back unless the attacker keeps its distance.
        let mut attacker_killed = false;
        if !target_killed && !attacker_unit.keywords.contains(Keyword::Ranged) {
            if let Some(counter) = self.unit(target).map(|u| u.attack) {
                attacker_killed = self.deal_damage(attacker, counter);
            }
        }

        Ok(AttackOutcome {
            target_killed,
            attacker_killed,
        })
    }

    fn strike_icon(&mut self, attacker: UnitId, side: Side) -> Result<IconOutcome, HostError> {
        let attack = self
            .unit(attacker)
            .ok_or_else(|| HostError::AttackRejected(format!("{attacker} not on the board")))?
            .attack;
        Ok(self.damage_icon(side, attack))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::KeywordSet;

    fn plain(id: u32, attack: i32, health: i32) -> FieldUnit {
        FieldUnit::new(UnitId::new(id), attack, health, KeywordSet::new())
    }

    fn keyworded(id: u32, attack: i32, health: i32, keyword: Keyword) -> FieldUnit {
        FieldUnit::new(
            UnitId::new(id),
            attack,
            health,
            KeywordSet::new().with(keyword),
        )
    }

    #[test]
    fn test_summon_flow() {
        let card = Card::monster(CardId::new(1), "Grunt", 2, 3, 2, KeywordSet::new());
        let mut battle = SimBattle::new().with_card(Side::Enemy, card.clone());

        let taken = battle.take_card(Side::Enemy, CardId::new(1)).unwrap();
        let id = battle.summon(Side::Enemy, 2, &taken).unwrap();

        assert_eq!(battle.hand_size(Side::Enemy), 0);
        let unit = battle.unit(id).unwrap();
        assert_eq!(unit.attack, 3);
        assert_eq!(unit.health, 2);
        assert_eq!(battle.unit_at(Side::Enemy, 2).unwrap().id, id);
    }

    #[test]
    fn test_summon_rejects_occupied_slot() {
        let card = Card::monster(CardId::new(1), "Grunt", 2, 3, 2, KeywordSet::new());
        let mut battle = SimBattle::new().with_unit(Side::Enemy, 0, plain(5, 1, 1));
        assert!(matches!(
            battle.summon(Side::Enemy, 0, &card),
            Err(HostError::BoardFull)
        ));
    }

    #[test]
    fn test_spend_mana_guard() {
        let mut battle = SimBattle::new().with_mana(Side::Enemy, 3);
        battle.spend_mana(Side::Enemy, 2).unwrap();
        assert_eq!(battle.mana(Side::Enemy), 1);
        assert!(battle.spend_mana(Side::Enemy, 2).is_err());
    }

    #[test]
    fn test_attack_with_counter() {
        let mut battle = SimBattle::new()
            .with_unit(Side::Enemy, 0, plain(1, 3, 4))
            .with_unit(Side::Player, 0, plain(2, 2, 5));

        let outcome = battle.resolve_attack(UnitId::new(1), UnitId::new(2)).unwrap();
        assert!(!outcome.target_killed);
        assert!(!outcome.attacker_killed);
        assert_eq!(battle.unit(UnitId::new(2)).unwrap().health, 2);
        assert_eq!(battle.unit(UnitId::new(1)).unwrap().health, 2);
    }

    #[test]
    fn test_kill_prevents_counter() {
        let mut battle = SimBattle::new()
            .with_unit(Side::Enemy, 0, plain(1, 5, 2))
            .with_unit(Side::Player, 0, plain(2, 4, 4));

        let outcome = battle.resolve_attack(UnitId::new(1), UnitId::new(2)).unwrap();
        assert!(outcome.target_killed);
        assert!(!outcome.attacker_killed);
        assert_eq!(battle.unit(UnitId::new(1)).unwrap().health, 2);
        assert_eq!(battle.fallen(), &[UnitId::new(2)]);
        assert!(battle.unit_at(Side::Player, 0).is_none());
    }

    #[test]
    fn test_ranged_attacker_avoids_counter() {
        let mut battle = SimBattle::new()
            .with_unit(Side::Enemy, 0, keyworded(1, 2, 1, Keyword::Ranged))
            .with_unit(Side::Player, 0, plain(2, 6, 5));

        let outcome = battle.resolve_attack(UnitId::new(1), UnitId::new(2)).unwrap();
        assert!(!outcome.target_killed);
        assert!(!outcome.attacker_killed);
        assert_eq!(battle.unit(UnitId::new(1)).unwrap().health, 1);
    }

    #[test]
    fn test_tough_halves_rounding_up() {
        let mut battle = SimBattle::new()
            .with_unit(Side::Enemy, 0, plain(1, 5, 4))
            .with_unit(Side::Player, 0, keyworded(2, 1, 6, Keyword::Tough));

        battle.resolve_attack(UnitId::new(1), UnitId::new(2)).unwrap();
        // 5 halves to 3.
        assert_eq!(battle.unit(UnitId::new(2)).unwrap().health, 3);
    }

    #[test]
    fn test_overwhelm_splash() {
        let mut battle = SimBattle::new()
            .with_unit(Side::Enemy, 0, keyworded(1, 6, 5, Keyword::Overwhelm))
            .with_unit(Side::Player, 0, plain(2, 1, 2))
            .with_unit(Side::Player, 1, plain(3, 1, 2))
            .with_unit(Side::Player, 2, plain(4, 1, 5));

        let outcome = battle.resolve_attack(UnitId::new(1), UnitId::new(2)).unwrap();
        assert!(outcome.target_killed);
        // Splash of 3 kills the other 2-health unit and dents the 5-health one.
        assert!(battle.unit(UnitId::new(3)).is_none());
        assert_eq!(battle.unit(UnitId::new(4)).unwrap().health, 2);
        assert_eq!(battle.fallen().len(), 2);
    }

    #[test]
    fn test_shield_absorbs_and_depletes() {
        let mut battle = SimBattle::new()
            .with_unit(Side::Enemy, 0, plain(1, 4, 3))
            .with_unit(Side::Player, 0, plain(2, 0, 6))
            .with_ongoing(
                TargetRef::Unit(UnitId::new(2)),
                ActiveEffect {
                    kind: EffectKind::Shield,
                    value: 3,
                    remaining_rounds: 2,
                },
            );

        battle.resolve_attack(UnitId::new(1), UnitId::new(2)).unwrap();
        // 4 damage: 3 absorbed, 1 through. The shield is spent.
        assert_eq!(battle.unit(UnitId::new(2)).unwrap().health, 5);
        assert!(!battle.carries(TargetRef::Unit(UnitId::new(2)), EffectKind::Shield));
    }

    #[test]
    fn test_strike_icon() {
        let mut battle = SimBattle::new()
            .with_icon(Side::Player, 5, 30)
            .with_unit(Side::Enemy, 0, plain(1, 6, 3));

        let outcome = battle.strike_icon(UnitId::new(1), Side::Player).unwrap();
        assert_eq!(outcome.damage_dealt, 6);
        assert!(outcome.icon_destroyed);
        assert_eq!(battle.icon(Side::Player).health, 0);
    }

    #[test]
    fn test_draw_respects_hand_limit() {
        let mut battle = SimBattle::new().with_hand_limit(Side::Enemy, 3);
        for i in 0..2 {
            battle = battle.with_card(
                Side::Enemy,
                Card::monster(CardId::new(i + 1), "Filler", 1, 1, 1, KeywordSet::new()),
            );
        }

        battle
            .apply_effect(Side::Enemy, Effect::draw(5), TargetRef::Icon(Side::Enemy))
            .unwrap();
        assert_eq!(battle.hand_size(Side::Enemy), 3);
    }

    #[test]
    fn test_burn_tracked_as_pending() {
        let mut battle = SimBattle::new().with_unit(Side::Player, 0, plain(1, 1, 5));
        battle
            .apply_effect(
                Side::Enemy,
                Effect::burn(2, 3),
                TargetRef::Unit(UnitId::new(1)),
            )
            .unwrap();
        assert_eq!(battle.pending_burn(TargetRef::Unit(UnitId::new(1))), 6);
    }

    #[test]
    fn test_bloodprice_hits_caster() {
        let mut battle = SimBattle::new().with_icon(Side::Enemy, 20, 30);
        battle
            .apply_effect(
                Side::Enemy,
                Effect::bloodprice(4),
                TargetRef::Icon(Side::Enemy),
            )
            .unwrap();
        assert_eq!(battle.icon(Side::Enemy).health, 16);
    }

    #[test]
    fn test_heal_clamps_to_max() {
        let mut unit = plain(1, 1, 6);
        unit.health = 3;
        let mut battle = SimBattle::new().with_unit(Side::Enemy, 0, unit);
        battle
            .apply_effect(Side::Enemy, Effect::heal(9), TargetRef::Unit(UnitId::new(1)))
            .unwrap();
        assert_eq!(battle.unit(UnitId::new(1)).unwrap().health, 6);
    }

    #[test]
    fn test_attack_limiter() {
        let mut battle = SimBattle::new();
        let id = UnitId::new(1);
        assert!(battle.can_attack(id));
        battle.register_attack(id);
        assert!(!battle.can_attack(id));
        battle.reset_attacks(id);
        assert!(battle.can_attack(id));
    }

    #[test]
    fn test_dead_units_drop_state() {
        let mut battle = SimBattle::new()
            .with_unit(Side::Enemy, 0, plain(1, 9, 9))
            .with_unit(Side::Player, 0, plain(2, 1, 2))
            .with_ongoing(
                TargetRef::Unit(UnitId::new(2)),
                ActiveEffect {
                    kind: EffectKind::Burn,
                    value: 1,
                    remaining_rounds: 2,
                },
            );
        battle.register_attack(UnitId::new(2));

        battle.resolve_attack(UnitId::new(1), UnitId::new(2)).unwrap();
        assert!(battle.unit(UnitId::new(2)).is_none());
        assert!(battle.active_effects(TargetRef::Unit(UnitId::new(2))).is_empty());
        assert!(battle.can_attack(UnitId::new(2)));
    }
}
