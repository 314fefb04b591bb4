//! Board-slot selection for freshly summoned monsters.
//!
//! Slots are scored against the unit's statline and keywords: ranged
//! units drift to the back row, walls and tanky bodies to the front,
//! heavy hitters toward the middle where they can reach either flank.

use crate::core::{Keyword, KeywordSet, Side};
use crate::host::Battlefield;

/// Base pull toward the middle slot. Smaller than the row steps so
/// ranged and guard units still commit to their preferred row.
const CENTER_WEIGHT: f32 = 4.0;
/// Per-slot pull toward the back row for ranged units.
const RANGED_BACK_STEP: f32 = 5.0;
/// Per-slot pull toward the front row for guards.
const GUARD_FRONT_STEP: f32 = 5.0;
/// Extra center pull for heavy hitters.
const HIGH_ATTACK_CENTER_WEIGHT: f32 = 15.0;
/// Health at which a unit counts as a guard even without Taunt.
const GUARD_HEALTH: i32 = 5;
/// Attack at which a unit counts as a heavy hitter.
const HIGH_ATTACK: i32 = 4;

/// Pick the best open slot for a monster, or `None` when the side's
/// board is full.
#[must_use]
pub fn best_slot<B: Battlefield + ?Sized>(
    field: &B,
    side: Side,
    attack: i32,
    health: i32,
    keywords: KeywordSet,
) -> Option<usize> {
    let count = field.slot_count(side);
    if count == 0 {
        return None;
    }
    let last = count - 1;

    let mut best: Option<(usize, f32)> = None;
    for slot in 0..count {
        if field.unit_at(side, slot).is_some() {
            continue;
        }
        let score = slot_score(slot, last, attack, health, keywords);
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((slot, score)),
        }
    }
    best.map(|(slot, _)| slot)
}

fn slot_score(slot: usize, last: usize, attack: i32, health: i32, keywords: KeywordSet) -> f32 {
    let center = last as f32 / 2.0;
    let span = center.max(1.0);
    let closeness = 1.0 - (slot as f32 - center).abs() / span;

    let mut score = CENTER_WEIGHT * closeness;
    if keywords.contains(Keyword::Ranged) {
        score += RANGED_BACK_STEP * slot as f32;
    }
    if keywords.contains(Keyword::Taunt) || health >= GUARD_HEALTH {
        score += GUARD_FRONT_STEP * (last - slot) as f32;
    }
    if attack >= HIGH_ATTACK {
        score += HIGH_ATTACK_CENTER_WEIGHT * closeness;
    }
    score
}
