//! Units, sides, phases, and target references.
//!
//! Two flavors of unit appear in the API:
//!
//! - [`FieldUnit`] is the host's mutable record of a creature on the board.
//!   The host owns it; the engine only reads it when taking a snapshot.
//! - [`Unit`] is the engine's frozen view of one creature inside a
//!   [`BoardSnapshot`](crate::board::BoardSnapshot). All scoring works
//!   against this type.
//!
//! [`TargetRef`] names anything an attack or effect can land on, either a
//! unit by ID or a side's health icon.

use serde::{Deserialize, Serialize};

use super::keyword::KeywordSet;

/// One of the two sides of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// The side opposing this one.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Enemy => write!(f, "enemy"),
        }
    }
}

/// The phase of the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Cards may be played.
    Preparation,
    /// Units may attack.
    Combat,
    /// End-of-turn upkeep; the engine does nothing here.
    Cleanup,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Preparation => write!(f, "preparation"),
            Self::Combat => write!(f, "combat"),
            Self::Cleanup => write!(f, "cleanup"),
        }
    }
}

/// Unique identifier for a unit on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    /// Create a new unit ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unit({})", self.0)
    }
}

/// A creature on the board, as owned and mutated by the host.
///
/// `placed` is false while a summon animation is still in flight; `fading`
/// is true once a death animation has started. Units in either state are
/// invisible to snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldUnit {
    pub id: UnitId,
    pub attack: i32,
    pub health: i32,
    pub max_health: i32,
    pub keywords: KeywordSet,
    pub placed: bool,
    pub dead: bool,
    pub fading: bool,
}

impl FieldUnit {
    /// Create a placed, living unit.
    #[must_use]
    pub fn new(id: UnitId, attack: i32, health: i32, keywords: KeywordSet) -> Self {
        Self {
            id,
            attack,
            health,
            max_health: health,
            keywords,
            placed: true,
            dead: false,
            fading: false,
        }
    }

    /// Is this unit visible to a board snapshot?
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.placed && !self.dead && !self.fading && self.health > 0
    }
}

/// The engine's frozen view of one unit inside a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub side: Side,
    /// Board slot index, 0-based from the leftmost slot.
    pub slot: usize,
    pub attack: i32,
    pub health: i32,
    pub max_health: i32,
    pub keywords: KeywordSet,
    /// Total burn damage still scheduled against this unit.
    pub pending_burn: i32,
}

impl Unit {
    /// Current health as a fraction of maximum, in `[0, 1]`.
    ///
    /// Returns 1.0 when `max_health` is zero or negative.
    #[must_use]
    pub fn health_ratio(&self) -> f32 {
        if self.max_health <= 0 {
            return 1.0;
        }
        (self.health.max(0) as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }

    /// Is this unit wounded below full health?
    #[must_use]
    pub fn is_wounded(&self) -> bool {
        self.health < self.max_health
    }
}

/// A side's health icon: the win-condition target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthIcon {
    pub side: Side,
    pub health: i32,
    pub max_health: i32,
}

impl HealthIcon {
    /// Current health as a fraction of maximum, in `[0, 1]`.
    #[must_use]
    pub fn health_ratio(&self) -> f32 {
        if self.max_health <= 0 {
            return 1.0;
        }
        (self.health.max(0) as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

/// Something an attack or effect can land on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRef {
    /// A unit on the board.
    Unit(UnitId),
    /// A side's health icon.
    Icon(Side),
}

impl std::fmt::Display for TargetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unit(id) => write!(f, "{id}"),
            Self::Icon(side) => write!(f, "{side} icon"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::keyword::Keyword;

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Player.opponent(), Side::Enemy);
        assert_eq!(Side::Enemy.opponent(), Side::Player);
    }

    #[test]
    fn test_field_unit_active() {
        let mut unit = FieldUnit::new(UnitId::new(1), 3, 4, KeywordSet::new());
        assert!(unit.is_active());

        unit.fading = true;
        assert!(!unit.is_active());

        unit.fading = false;
        unit.health = 0;
        assert!(!unit.is_active());
    }

    #[test]
    fn test_unplaced_unit_inactive() {
        let mut unit = FieldUnit::new(UnitId::new(2), 1, 1, KeywordSet::new());
        unit.placed = false;
        assert!(!unit.is_active());
    }

    #[test]
    fn test_health_ratio() {
        let unit = Unit {
            id: UnitId::new(1),
            side: Side::Enemy,
            slot: 0,
            attack: 2,
            health: 3,
            max_health: 6,
            keywords: KeywordSet::new(),
            pending_burn: 0,
        };
        assert!((unit.health_ratio() - 0.5).abs() < f32::EPSILON);
        assert!(unit.is_wounded());
    }

    #[test]
    fn test_health_ratio_degenerate_max() {
        let unit = Unit {
            id: UnitId::new(1),
            side: Side::Player,
            slot: 0,
            attack: 1,
            health: 1,
            max_health: 0,
            keywords: KeywordSet::new(),
            pending_burn: 0,
        };
        assert!((unit.health_ratio() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_target_ref_display() {
        assert_eq!(format!("{}", TargetRef::Unit(UnitId::new(3))), "Unit(3)");
        assert_eq!(format!("{}", TargetRef::Icon(Side::Player)), "player icon");
    }

    #[test]
    fn test_keyworded_unit() {
        let unit = FieldUnit::new(
            UnitId::new(9),
            5,
            2,
            KeywordSet::new().with(Keyword::Overwhelm),
        );
        assert!(unit.keywords.contains(Keyword::Overwhelm));
        assert!(!unit.keywords.contains(Keyword::Taunt));
    }
}
