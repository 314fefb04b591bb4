//! Sequencing attackers for the swing.

use std::cmp::Reverse;

use crate::combat::effective_damage;
use crate::core::{DecisionRng, Keyword, Unit};

/// Attack at which an opposing unit makes Tough attackers eager to trade.
const HEAVY_OPPONENT_ATTACK: i32 = 4;

/// Order `attackers` in place for this turn's swing.
///
/// On a lethal turn the order is all business: with Taunt in the way,
/// cheap bodies go first to clear it (health ascending, attack descending
/// on ties); on an open board the hardest hitters lead. On a normal turn
/// the order front-loads attackers whose advantages are easiest to waste:
/// Overwhelm into a crowd, Ranged (no counter to fear), guaranteed kills,
/// Tough units that blank a heavy counter, then raw attack, then low
/// health. A small `shuffle_chance` of adjacent swaps keeps replays from
/// looking scripted; lethal turns are never shuffled.
pub fn order_attackers(
    attackers: &mut [Unit],
    defenders: &[Unit],
    lethal: bool,
    shuffle_chance: f64,
    rng: &mut DecisionRng,
) {
    if lethal {
        let taunted = defenders
            .iter()
            .any(|d| d.keywords.contains(Keyword::Taunt));
        if taunted {
            attackers.sort_by_key(|a| (a.health, Reverse(a.attack)));
        } else {
            attackers.sort_by_key(|a| Reverse(a.attack));
        }
        return;
    }

    let crowd = defenders.len() > 1;
    let heavy_opponent = defenders
        .iter()
        .any(|d| d.attack >= HEAVY_OPPONENT_ATTACK);
    attackers.sort_by_key(|a| {
        let overwhelm_crowd = crowd && a.keywords.contains(Keyword::Overwhelm);
        let ranged = a.keywords.contains(Keyword::Ranged);
        let can_kill = defenders
            .iter()
            .any(|d| effective_damage(a.attack, d.keywords) >= d.health);
        let braced_tough = heavy_opponent && a.keywords.contains(Keyword::Tough);
        Reverse((
            overwhelm_crowd,
            ranged,
            can_kill,
            braced_tough,
            a.attack,
            Reverse(a.health),
        ))
    });

    if attackers.len() > 1 {
        for i in 0..attackers.len() - 1 {
            if rng.roll(shuffle_chance) {
                attackers.swap(i, i + 1);
            }
        }
    }
}
