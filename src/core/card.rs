//! Cards: the engine's view of what sits in a hand.
//!
//! The hand itself lives with the host — cards exist there until the
//! instant one is successfully played, at which point the host removes it.
//! The engine reads cards to score them and names them by `CardId` when
//! asking the host to consume one.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::effect::Effect;
use super::keyword::KeywordSet;

/// Unique identifier for a card within a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
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

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// What a card does when played.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    /// Summons a unit onto an open board slot.
    Monster {
        attack: i32,
        health: i32,
        keywords: KeywordSet,
    },
    /// Resolves an ordered list of effects.
    Spell { effects: SmallVec<[Effect; 2]> },
}

/// A playable card: mana cost plus a monster or spell payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub cost: i32,
    pub kind: CardKind,
}

impl Card {
    /// Create a monster card.
    #[must_use]
    pub fn monster(
        id: CardId,
        name: impl Into<String>,
        cost: i32,
        attack: i32,
        health: i32,
        keywords: KeywordSet,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            kind: CardKind::Monster {
                attack,
                health,
                keywords,
            },
        }
    }

    /// Create a spell card from its effects, in resolution order.
    #[must_use]
    pub fn spell(
        id: CardId,
        name: impl Into<String>,
        cost: i32,
        effects: impl IntoIterator<Item = Effect>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            kind: CardKind::Spell {
                effects: effects.into_iter().collect(),
            },
        }
    }

    /// Is this a monster card?
    #[must_use]
    pub fn is_monster(&self) -> bool {
        matches!(self.kind, CardKind::Monster { .. })
    }

    /// Is this a spell card?
    #[must_use]
    pub fn is_spell(&self) -> bool {
        matches!(self.kind, CardKind::Spell { .. })
    }

    /// The spell's effects, or an empty slice for monsters.
    #[must_use]
    pub fn effects(&self) -> &[Effect] {
        match &self.kind {
            CardKind::Spell { effects } => effects,
            CardKind::Monster { .. } => &[],
        }
    }

    /// The monster's keyword set, or an empty set for spells.
    #[must_use]
    pub fn keywords(&self) -> KeywordSet {
        match &self.kind {
            CardKind::Monster { keywords, .. } => *keywords,
            CardKind::Spell { .. } => KeywordSet::new(),
        }
    }
}
