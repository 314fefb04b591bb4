//! Unit keywords and keyword sets.
//!
//! Keywords are the closed set of combat-relevant tags a monster card or a
//! placed unit can carry. The engine only reads them; the host's combat
//! rules give them mechanical meaning:
//!
//! - `Taunt`: attackers must target this unit before anything else
//! - `Ranged`: attacks without exposing itself to a counter-attack
//! - `Tough`: incoming damage is halved
//! - `Overwhelm`: attacks splash roughly half damage onto adjacent units
//!
//! `KeywordSet` is a compact bitset; with four variants it fits a `u8` and
//! copies for free, which matters because every snapshot unit carries one.

use serde::{Deserialize, Serialize};

/// A combat keyword attached to a monster card or placed unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    /// Forces attackers to target this unit first.
    Taunt,
    /// Attacks without receiving a counter-attack; prefers the back row.
    Ranged,
    /// Halves all incoming damage.
    Tough,
    /// Splashes ~50% of attack onto the defender's other units.
    Overwhelm,
}

impl Keyword {
    /// All keywords, in declaration order.
    pub const ALL: [Keyword; 4] = [
        Keyword::Taunt,
        Keyword::Ranged,
        Keyword::Tough,
        Keyword::Overwhelm,
    ];

    const fn bit(self) -> u8 {
        match self {
            Keyword::Taunt => 1 << 0,
            Keyword::Ranged => 1 << 1,
            Keyword::Tough => 1 << 2,
            Keyword::Overwhelm => 1 << 3,
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Keyword::Taunt => "Taunt",
            Keyword::Ranged => "Ranged",
            Keyword::Tough => "Tough",
            Keyword::Overwhelm => "Overwhelm",
        };
        write!(f, "{name}")
    }
}

/// A set of keywords, stored as a bitset.
///
/// ```
/// use duelmind::core::{Keyword, KeywordSet};
///
/// let set = KeywordSet::from_iter([Keyword::Taunt, Keyword::Tough]);
/// assert!(set.contains(Keyword::Taunt));
/// assert!(!set.contains(Keyword::Ranged));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeywordSet(u8);

impl KeywordSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Insert a keyword. Inserting twice is a no-op.
    pub fn insert(&mut self, keyword: Keyword) {
        self.0 |= keyword.bit();
    }

    /// Remove a keyword.
    pub fn remove(&mut self, keyword: Keyword) {
        self.0 &= !keyword.bit();
    }

    /// Check membership.
    #[must_use]
    pub const fn contains(self, keyword: Keyword) -> bool {
        self.0 & keyword.bit() != 0
    }

    /// Number of keywords in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Is the set empty?
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the keywords present, in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Keyword> {
        Keyword::ALL.into_iter().filter(move |k| self.contains(*k))
    }

    /// Builder-style insertion.
    #[must_use]
    pub fn with(mut self, keyword: Keyword) -> Self {
        self.insert(keyword);
        self
    }
}

impl FromIterator<Keyword> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = Keyword>>(iter: I) -> Self {
        let mut set = Self::new();
        for k in iter {
            set.insert(k);
        }
        set
    }
}

impl std::fmt::Display for KeywordSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for k in self.iter() {
            if !first {
                write!(f, "+")?;
            }
            write!(f, "{k}")?;
            first = false;
        }
        if first {
            write!(f, "-")?;
        }
        Ok(())
    }
}
