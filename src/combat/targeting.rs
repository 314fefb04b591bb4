//! Per-attacker target selection.
//!
//! Candidates are the defender's living units, narrowed to Taunt units
//! when any are present. Overwhelm attackers facing a crowd use a
//! dedicated splash estimate; everyone else scores candidates on trade
//! quality, posture, keyword matchup, and counter-attack risk, with
//! decision noise layered on top so the pick is convincing rather than
//! mechanical.
//!
//! Health icons are never selected here. The attack director strikes the
//! icon only once the defending board is completely empty.

use std::cmp::Ordering;

use crate::board::BoardSnapshot;
use crate::combat::effective_damage;
use crate::config::NoiseConfig;
use crate::core::{DecisionRng, Keyword, Unit, UnitId};
use crate::scoring::KeywordScorer;
use crate::tactics::Posture;

const PRIMARY_KILL_BONUS: f32 = 100.0;
const SPLASH_KILL_BONUS: f32 = 50.0;
const SPLASH_DAMAGE_WEIGHT: f32 = 2.0;
const KILL_ATTACK_WEIGHT: f32 = 5.0;
const CROWD_WEIGHT: f32 = 5.0;

const ATTACK_WEIGHT: f32 = 1.2;
const HEALTH_WEIGHT: f32 = 0.8;
const AGGRO_TARGET_ATTACK_WEIGHT: f32 = 0.7;
const AGGRO_KILL_BONUS: f32 = 90.0;
const DEFENSIVE_SELF_WEIGHT: f32 = 0.2;
const DEFENSIVE_TAUNT_BONUS: f32 = 60.0;
const MATCHUP_WEIGHT: f32 = 1.2;
const COUNTER_DEATH_PENALTY: f32 = 80.0;

/// Choose a unit target for `attacker`, or `None` when the defending
/// board is empty and only the icon remains.
pub fn select_target(
    attacker: &Unit,
    board: &BoardSnapshot,
    posture: Posture,
    keywords: &KeywordScorer,
    noise: &NoiseConfig,
    rng: &mut DecisionRng,
) -> Option<UnitId> {
    let defenders = board.foe_units();
    if defenders.is_empty() {
        return None;
    }

    let taunts: Vec<&Unit> = defenders
        .iter()
        .filter(|u| u.keywords.contains(Keyword::Taunt))
        .collect();
    let candidates: Vec<&Unit> = if taunts.is_empty() {
        defenders.iter().collect()
    } else {
        taunts
    };

    if attacker.keywords.contains(Keyword::Overwhelm) && candidates.len() > 1 {
        return Some(overwhelm_pick(attacker, &candidates));
    }

    let mut scored: Vec<(UnitId, f32)> = candidates
        .iter()
        .map(|candidate| {
            let score = candidate_score(attacker, candidate, posture, keywords, board)
                * rng.jitter(noise.score_variance);
            (candidate.id, score)
        })
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let mut index = 0;
    if scored.len() > 1 && rng.roll(noise.suboptimal_chance) {
        index = (1 + rng.pick(2)).min(scored.len() - 1);
    }
    Some(scored[index].0)
}

/// Splash-aware pick for an Overwhelm attacker facing a crowd.
///
/// The splash share is treated as carved out of the swing, so the
/// primary-kill check runs on the remainder. Hitting a small unit and
/// splashing its neighbors outscores burying the whole swing in one
/// large body.
fn overwhelm_pick(attacker: &Unit, candidates: &[&Unit]) -> UnitId {
    let splash = attacker.attack / 2;
    let mut best: Option<(UnitId, f32)> = None;

    for candidate in candidates {
        let primary = effective_damage(attacker.attack - splash, candidate.keywords);
        let kill = primary >= candidate.health;

        let mut splash_kills = 0usize;
        let mut dented = 0usize;
        for other in candidates.iter().filter(|o| o.id != candidate.id) {
            if splash > 0 && effective_damage(splash, other.keywords) >= other.health {
                splash_kills += 1;
            } else if splash > 0 {
                dented += 1;
            }
        }

        let mut score = SPLASH_KILL_BONUS * splash_kills as f32
            + SPLASH_DAMAGE_WEIGHT * splash as f32 * dented as f32
            + CROWD_WEIGHT * (candidates.len() - 1) as f32;
        if kill {
            score += PRIMARY_KILL_BONUS + KILL_ATTACK_WEIGHT * attacker.attack as f32;
        }

        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((candidate.id, score)),
        }
    }

    // Candidates are non-empty by construction.
    best.map_or(attacker.id, |(id, _)| id)
}

/// Trade quality of attacking `candidate`, before decision noise.
fn candidate_score(
    attacker: &Unit,
    candidate: &Unit,
    posture: Posture,
    keywords: &KeywordScorer,
    board: &BoardSnapshot,
) -> f32 {
    let mut score =
        attacker.attack as f32 * ATTACK_WEIGHT - candidate.health as f32 * HEALTH_WEIGHT;
    let kill = effective_damage(attacker.attack, candidate.keywords) >= candidate.health;

    match posture {
        Posture::Aggro => {
            score += candidate.attack as f32 * AGGRO_TARGET_ATTACK_WEIGHT;
            if kill {
                score += AGGRO_KILL_BONUS;
            }
        }
        Posture::Defensive => {
            score -= attacker.health as f32 * DEFENSIVE_SELF_WEIGHT;
            if candidate.keywords.contains(Keyword::Taunt) {
                score += DEFENSIVE_TAUNT_BONUS;
            }
        }
    }

    score += MATCHUP_WEIGHT * keywords.matchup(attacker, candidate, board);

    if !attacker.keywords.contains(Keyword::Ranged) {
        let counter = effective_damage(candidate.attack, attacker.keywords);
        if counter >= attacker.health {
            score -= COUNTER_DEATH_PENALTY;
        } else if attacker.health > 0 {
            score -= COUNTER_DEATH_PENALTY * counter as f32 / attacker.health as f32;
        }
    }

    score
}
