//! Can this turn's attacks end the game?
//!
//! The check is an estimate, not a proof: it sums raw attack, assumes
//! Taunt health must be paid through first, and deliberately ignores
//! Tough halving and counter-attack losses. The small icon-health slack
//! in each comparison absorbs most of that error.

use tracing::debug;

use crate::core::{HealthIcon, Keyword, Unit};

/// Slack against the icon when Taunt health has to be cleared first.
const TAUNT_SLACK: i32 = 2;
/// Slack against the icon on an open board.
const OPEN_SLACK: i32 = 1;

/// The outcome of a lethal estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LethalAssessment {
    /// Whether the turn looks lethal.
    pub lethal: bool,
    /// Summed attack of every available attacker.
    pub total_attack: i32,
    /// Summed health of the defending Taunt units.
    pub taunt_health: i32,
}

/// Estimate whether `attackers` can destroy the defending icon this turn.
///
/// With Taunt defenders present, their total health is paid out of the
/// attack budget and the remainder must reach `icon.health - 2`. With an
/// open board the total must exceed `icon.health - 1`.
#[must_use]
pub fn assess_lethal(attackers: &[Unit], defenders: &[Unit], icon: HealthIcon) -> LethalAssessment {
    let total_attack: i32 = attackers.iter().map(|u| u.attack).sum();
    let taunts: Vec<&Unit> = defenders
        .iter()
        .filter(|u| u.keywords.contains(Keyword::Taunt))
        .collect();
    let taunt_health: i32 = taunts.iter().map(|u| u.health).sum();

    let lethal = if taunts.is_empty() {
        total_attack > icon.health - OPEN_SLACK
    } else {
        total_attack - taunt_health >= icon.health - TAUNT_SLACK
    };

    if lethal {
        debug!(total_attack, taunt_health, icon = icon.health, "lethal on board");
    }
    LethalAssessment {
        lethal,
        total_attack,
        taunt_health,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{KeywordSet, Side, UnitId};

    fn unit(id: u32, side: Side, attack: i32, health: i32, keywords: KeywordSet) -> Unit {
        Unit {
            id: UnitId::new(id),
            side,
            slot: 0,
            attack,
            health,
            max_health: health,
            keywords,
            pending_burn: 0,
        }
    }

    fn icon(health: i32) -> HealthIcon {
        HealthIcon {
            side: Side::Player,
            health,
            max_health: 30,
        }
    }

    fn attackers(damages: &[i32]) -> Vec<Unit> {
        damages
            .iter()
            .enumerate()
            .map(|(i, &attack)| unit(i as u32 + 1, Side::Enemy, attack, 2, KeywordSet::new()))
            .collect()
    }

    #[test]
    fn test_open_board_lethal() {
        let ours = attackers(&[3, 4]);
        assert!(assess_lethal(&ours, &[], icon(6)).lethal);
        assert!(!assess_lethal(&ours, &[], icon(8)).lethal);
    }

    #[test]
    fn test_taunt_absorbs_attack_budget() {
        let wall = vec![unit(9, Side::Player, 1, 5, KeywordSet::new().with(Keyword::Taunt))];

        let weak = attackers(&[3, 4]);
        assert!(!assess_lethal(&weak, &wall, icon(7)).lethal);

        let strong = attackers(&[5, 5]);
        assert!(assess_lethal(&strong, &wall, icon(7)).lethal);
        assert!(!assess_lethal(&strong, &wall, icon(8)).lethal);
    }

    #[test]
    fn test_assessment_carries_totals() {
        let wall = vec![unit(9, Side::Player, 1, 5, KeywordSet::new().with(Keyword::Taunt))];
        let result = assess_lethal(&attackers(&[5, 5]), &wall, icon(20));
        assert_eq!(result.total_attack, 10);
        assert_eq!(result.taunt_health, 5);
        assert!(!result.lethal);
    }

    #[test]
    fn test_no_attackers_never_lethal() {
        assert!(!assess_lethal(&[], &[], icon(1)).lethal);
    }
}
