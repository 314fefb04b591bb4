//! The per-cycle board snapshot.
//!
//! A [`BoardSnapshot`] freezes everything the scorers are allowed to see:
//! icons, mana, hand sizes, turn order, and the living placed units of both
//! sides. It is rebuilt at the start of every decision cycle and discarded
//! at the end; nothing in the engine holds one across cycles.
//!
//! Fields are stored absolutely (player vs enemy); the `own_*`/`foe_*`
//! accessors re-express them relative to `acting_side` so scoring code
//! never branches on which side it is playing.

use serde::{Deserialize, Serialize};

use crate::core::{HealthIcon, Phase, Side, Unit, UnitId};

/// Immutable view of the battle at one decision point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// The side this snapshot was taken for.
    pub acting_side: Side,
    pub turn: u32,
    pub phase: Phase,
    /// Which side acts first on the next turn.
    pub first_next_turn: Side,
    pub player_icon: HealthIcon,
    pub enemy_icon: HealthIcon,
    pub player_mana: i32,
    pub enemy_mana: i32,
    pub player_hand_size: usize,
    pub enemy_hand_size: usize,
    /// Maximum hand size the host enforces.
    pub hand_limit: usize,
    /// Living placed units, both sides. Never contains dead, fading, or
    /// unplaced units.
    pub player_units: Vec<Unit>,
    pub enemy_units: Vec<Unit>,
    /// Board-control totals as computed at snapshot time.
    pub player_control: f32,
    pub enemy_control: f32,
}

impl BoardSnapshot {
    /// An empty board snapshot for the given acting side.
    ///
    /// Defaults: turn 1, preparation phase, both icons at 30/30, no mana,
    /// no units, empty hands with a limit of 10, player first next turn.
    #[must_use]
    pub fn new(acting_side: Side) -> Self {
        Self {
            acting_side,
            turn: 1,
            phase: Phase::Preparation,
            first_next_turn: Side::Player,
            player_icon: HealthIcon {
                side: Side::Player,
                health: 30,
                max_health: 30,
            },
            enemy_icon: HealthIcon {
                side: Side::Enemy,
                health: 30,
                max_health: 30,
            },
            player_mana: 0,
            enemy_mana: 0,
            player_hand_size: 0,
            enemy_hand_size: 0,
            hand_limit: 10,
            player_units: Vec::new(),
            enemy_units: Vec::new(),
            player_control: 0.0,
            enemy_control: 0.0,
        }
    }

    // === Builders (mainly for tests and fixtures) ===

    /// Set the turn count.
    #[must_use]
    pub fn with_turn(mut self, turn: u32) -> Self {
        self.turn = turn;
        self
    }

    /// Set the phase.
    #[must_use]
    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
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
        let icon = HealthIcon {
            side,
            health,
            max_health,
        };
        match side {
            Side::Player => self.player_icon = icon,
            Side::Enemy => self.enemy_icon = icon,
        }
        self
    }

    /// Set a side's mana.
    #[must_use]
    pub fn with_mana(mut self, side: Side, mana: i32) -> Self {
        match side {
            Side::Player => self.player_mana = mana,
            Side::Enemy => self.enemy_mana = mana,
        }
        self
    }

    /// Set a side's hand size.
    #[must_use]
    pub fn with_hand_size(mut self, side: Side, size: usize) -> Self {
        match side {
            Side::Player => self.player_hand_size = size,
            Side::Enemy => self.enemy_hand_size = size,
        }
        self
    }

    /// Set the hand limit.
    #[must_use]
    pub fn with_hand_limit(mut self, limit: usize) -> Self {
        self.hand_limit = limit;
        self
    }

    /// Add a unit to its side's list.
    #[must_use]
    pub fn with_unit(mut self, unit: Unit) -> Self {
        match unit.side {
            Side::Player => self.player_units.push(unit),
            Side::Enemy => self.enemy_units.push(unit),
        }
        self
    }

    /// Set a side's control total directly.
    #[must_use]
    pub fn with_control(mut self, side: Side, control: f32) -> Self {
        match side {
            Side::Player => self.player_control = control,
            Side::Enemy => self.enemy_control = control,
        }
        self
    }

    // === Absolute accessors ===

    /// The units of the given side.
    #[must_use]
    pub fn units_of(&self, side: Side) -> &[Unit] {
        match side {
            Side::Player => &self.player_units,
            Side::Enemy => &self.enemy_units,
        }
    }

    /// The icon of the given side.
    #[must_use]
    pub fn icon_of(&self, side: Side) -> HealthIcon {
        match side {
            Side::Player => self.player_icon,
            Side::Enemy => self.enemy_icon,
        }
    }

    /// The mana pool of the given side.
    #[must_use]
    pub fn mana_of(&self, side: Side) -> i32 {
        match side {
            Side::Player => self.player_mana,
            Side::Enemy => self.enemy_mana,
        }
    }

    /// The control total of the given side.
    #[must_use]
    pub fn control_of(&self, side: Side) -> f32 {
        match side {
            Side::Player => self.player_control,
            Side::Enemy => self.enemy_control,
        }
    }

    /// Look up a unit by ID on either side.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.player_units
            .iter()
            .chain(self.enemy_units.iter())
            .find(|u| u.id == id)
    }

    // === Acting-side accessors ===

    /// Units belonging to the acting side.
    #[must_use]
    pub fn own_units(&self) -> &[Unit] {
        self.units_of(self.acting_side)
    }

    /// Units belonging to the opposing side.
    #[must_use]
    pub fn foe_units(&self) -> &[Unit] {
        self.units_of(self.acting_side.opponent())
    }

    /// The acting side's icon.
    #[must_use]
    pub fn own_icon(&self) -> HealthIcon {
        self.icon_of(self.acting_side)
    }

    /// The opposing side's icon.
    #[must_use]
    pub fn foe_icon(&self) -> HealthIcon {
        self.icon_of(self.acting_side.opponent())
    }

    /// The acting side's mana.
    #[must_use]
    pub fn own_mana(&self) -> i32 {
        self.mana_of(self.acting_side)
    }

    /// The acting side's hand size.
    #[must_use]
    pub fn own_hand_size(&self) -> usize {
        match self.acting_side {
            Side::Player => self.player_hand_size,
            Side::Enemy => self.enemy_hand_size,
        }
    }

    /// The opposing side's hand size.
    #[must_use]
    pub fn foe_hand_size(&self) -> usize {
        match self.acting_side {
            Side::Player => self.enemy_hand_size,
            Side::Enemy => self.player_hand_size,
        }
    }

    /// The acting side's control total.
    #[must_use]
    pub fn own_control(&self) -> f32 {
        self.control_of(self.acting_side)
    }

    /// The opposing side's control total.
    #[must_use]
    pub fn foe_control(&self) -> f32 {
        self.control_of(self.acting_side.opponent())
    }

    // === Derived metrics ===

    /// Own control minus foe control.
    #[must_use]
    pub fn control_difference(&self) -> f32 {
        self.own_control() - self.foe_control()
    }

    /// Own icon health minus foe icon health.
    #[must_use]
    pub fn health_advantage(&self) -> i32 {
        self.own_icon().health - self.foe_icon().health
    }

    /// Is the acting side behind on icon health?
    #[must_use]
    pub fn health_disadvantage(&self) -> bool {
        self.health_advantage() < 0
    }

    /// Own hand size minus foe hand size.
    #[must_use]
    pub fn card_advantage(&self) -> i32 {
        self.own_hand_size() as i32 - self.foe_hand_size() as i32
    }

    /// The acting side's icon health as a fraction of its maximum.
    #[must_use]
    pub fn health_ratio(&self) -> f32 {
        self.own_icon().health_ratio()
    }

    /// Does the opposing side act first on the next turn?
    #[must_use]
    pub fn foe_first_next_turn(&self) -> bool {
        self.first_next_turn != self.acting_side
    }

    /// Does the given side field any unit with Taunt?
    #[must_use]
    pub fn side_has_taunt(&self, side: Side) -> bool {
        self.units_of(side)
            .iter()
            .any(|u| u.keywords.contains(crate::core::Keyword::Taunt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Keyword, KeywordSet};

    fn unit(id: u32, side: Side, attack: i32, health: i32) -> Unit {
        Unit {
            id: UnitId::new(id),
            side,
            slot: 0,
            attack,
            health,
            max_health: health,
            keywords: KeywordSet::new(),
            pending_burn: 0,
        }
    }

    #[test]
    fn test_perspective_accessors() {
        let snap = BoardSnapshot::new(Side::Enemy)
            .with_icon(Side::Enemy, 20, 30)
            .with_icon(Side::Player, 26, 30)
            .with_mana(Side::Enemy, 5)
            .with_hand_size(Side::Enemy, 4)
            .with_hand_size(Side::Player, 6)
            .with_unit(unit(1, Side::Enemy, 3, 3))
            .with_unit(unit(2, Side::Player, 2, 2));

        assert_eq!(snap.own_icon().health, 20);
        assert_eq!(snap.foe_icon().health, 26);
        assert_eq!(snap.own_mana(), 5);
        assert_eq!(snap.health_advantage(), -6);
        assert!(snap.health_disadvantage());
        assert_eq!(snap.card_advantage(), -2);
        assert_eq!(snap.own_units().len(), 1);
        assert_eq!(snap.foe_units().len(), 1);
        assert_eq!(snap.own_units()[0].id, UnitId::new(1));
    }

    #[test]
    fn test_health_ratio_uses_acting_side() {
        let snap = BoardSnapshot::new(Side::Enemy).with_icon(Side::Enemy, 9, 30);
        assert!((snap.health_ratio() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_foe_first_next_turn() {
        let snap = BoardSnapshot::new(Side::Enemy).with_first_next_turn(Side::Player);
        assert!(snap.foe_first_next_turn());

        let snap = snap.with_first_next_turn(Side::Enemy);
        assert!(!snap.foe_first_next_turn());
    }

    #[test]
    fn test_unit_lookup() {
        let snap = BoardSnapshot::new(Side::Player)
            .with_unit(unit(7, Side::Player, 1, 1))
            .with_unit(unit(9, Side::Enemy, 2, 2));

        assert!(snap.unit(UnitId::new(7)).is_some());
        assert!(snap.unit(UnitId::new(9)).is_some());
        assert!(snap.unit(UnitId::new(8)).is_none());
    }

    #[test]
    fn test_side_has_taunt() {
        let mut taunt = unit(1, Side::Player, 2, 5);
        taunt.keywords = KeywordSet::new().with(Keyword::Taunt);
        let snap = BoardSnapshot::new(Side::Enemy).with_unit(taunt);

        assert!(snap.side_has_taunt(Side::Player));
        assert!(!snap.side_has_taunt(Side::Enemy));
    }
}
