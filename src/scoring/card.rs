//! One playability score per card.
//!
//! Monsters score from their stats, a bundle of keyword situations, and
//! how well their cost fits the available mana. Spells score as the sum
//! of their effect values with turn-order multipliers layered on. Both
//! end with the same strategic nudge: walls and healing while behind,
//! pressure while not.
//!
//! The result is a full [`ScoreBreakdown`] so the play log can show why
//! a card rose to the top of the hand.

use crate::board::BoardSnapshot;
use crate::core::{Card, CardKind, Effect, EffectKind, Keyword, KeywordSet, TargetRef};
use crate::host::OngoingEffects;
use crate::scoring::breakdown::ScoreBreakdown;
use crate::scoring::effect::EffectScorer;
use crate::scoring::keyword::KeywordScorer;

const MONSTER_ATTACK_WEIGHT: f32 = 1.0;
const MONSTER_HEALTH_WEIGHT: f32 = 0.7;

const RANGED_BONUS: f32 = 30.0;
/// Attack/health ratio past which a ranged unit reads as a sniper.
const RANGED_SNIPER_RATIO: f32 = 1.5;
const RANGED_SNIPER_BONUS: f32 = 20.0;
const RANGED_FRAIL_HEALTH: i32 = 2;
const RANGED_EXPOSED_PENALTY: f32 = 15.0;

const BRUISER_HEALTH: i32 = 5;
const BRUISER_BONUS: f32 = 25.0;
const GLASS_HEALTH: i32 = 2;
const GLASS_ATTACK: i32 = 3;
const GLASS_PENALTY: f32 = 10.0;

const TOUGH_NEED_BONUS: f32 = 25.0;
const TOUGH_STURDY_HEALTH: i32 = 4;
const TOUGH_STURDY_BONUS: f32 = 15.0;
const TOUGH_VS_HITTER_ATTACK: i32 = 4;
const TOUGH_VS_HITTER_BONUS: f32 = 20.0;
const TOUGH_BRACED_BONUS: f32 = 20.0;

const OVERWHELM_AHEAD_BONUS: f32 = 30.0;
const OVERWHELM_BIG_ATTACK: i32 = 4;
const OVERWHELM_ATTACK_WEIGHT: f32 = 2.5;
const OVERWHELM_FRAIL_FOE_HEALTH: i32 = 2;
const OVERWHELM_FRAIL_FOE_BONUS: f32 = 25.0;
const OVERWHELM_LOW_ICON: i32 = 10;
const OVERWHELM_LOW_ICON_BONUS: f32 = 40.0;
const OVERWHELM_TEMPO_BONUS: f32 = 30.0;
const SPLASH_KILL_WEIGHT: f32 = 20.0;
const SPLASH_DENT_WEIGHT: f32 = 10.0;
const SPLASH_FINISH_BONUS: f32 = 50.0;

const GENERIC_KEYWORD_WEIGHT: f32 = 1.2;
const MANA_EFFICIENCY_WEIGHT: f32 = 50.0;

const NEED_TAUNT_BONUS: f32 = 30.0;
const NEED_HEAL_BONUS: f32 = 40.0;
const PRESS_ATTACKER_BONUS: f32 = 20.0;
const PRESS_DAMAGE_BONUS: f32 = 30.0;

const HEAL_BRACE_MULT: f32 = 1.3;
const BURST_FINISH_MULT: f32 = 1.4;
const BURST_FINISH_ICON: i32 = 10;
const DRAW_TEMPO_MULT: f32 = 1.2;
const BURN_TEMPO_MULT: f32 = 1.25;

const COMBO_DRAW_RATIO: f32 = 1.5;
const COMBO_MULT: f32 = 1.2;
const COMBO_RISK_HEALTH: i32 = 15;
const COMBO_RISK_BLOOD: i32 = 3;
const COMBO_RISK_MULT: f32 = 0.6;
const COMBO_RISK_EXPOSED_MULT: f32 = 0.7;

/// Scores whole cards by combining the keyword and effect scorers.
pub struct CardScorer<'a> {
    keywords: &'a KeywordScorer,
    effects: &'a EffectScorer,
}

impl<'a> CardScorer<'a> {
    /// Create a card scorer borrowing the two sub-scorers.
    #[must_use]
    pub fn new(keywords: &'a KeywordScorer, effects: &'a EffectScorer) -> Self {
        Self { keywords, effects }
    }

    /// Score a card for the acting side on the given board.
    #[must_use]
    pub fn score<R: OngoingEffects>(
        &self,
        card: &Card,
        board: &BoardSnapshot,
        registry: &R,
    ) -> ScoreBreakdown {
        let mut breakdown = match &card.kind {
            CardKind::Monster {
                attack,
                health,
                keywords,
            } => self.score_monster(*attack, *health, *keywords, board),
            CardKind::Spell { effects } => self.score_spell(effects, board, registry),
        };

        let mana = board.own_mana().max(1) as f32;
        breakdown.add(
            "mana efficiency",
            MANA_EFFICIENCY_WEIGHT * (1.0 - card.cost as f32 / mana),
        );
        self.strategic_nudge(card, board, &mut breakdown);
        breakdown
    }

    fn score_monster(
        &self,
        attack: i32,
        health: i32,
        keywords: KeywordSet,
        board: &BoardSnapshot,
    ) -> ScoreBreakdown {
        let mut b = ScoreBreakdown::new();
        b.add(
            "stats",
            attack as f32 * MONSTER_ATTACK_WEIGHT + health as f32 * MONSTER_HEALTH_WEIGHT,
        );

        if keywords.contains(Keyword::Ranged) {
            b.add("ranged", RANGED_BONUS);
            if health > 0 && attack as f32 / health as f32 > RANGED_SNIPER_RATIO {
                b.add("sniper statline", RANGED_SNIPER_BONUS);
            }
            if health <= RANGED_FRAIL_HEALTH && board.foe_first_next_turn() {
                b.add("exposed next turn", -RANGED_EXPOSED_PENALTY);
            }
        } else {
            if health >= BRUISER_HEALTH {
                b.add("bruiser", BRUISER_BONUS);
            }
            if health <= GLASS_HEALTH && attack > GLASS_ATTACK {
                b.add("glass cannon", -GLASS_PENALTY);
            }
        }

        if keywords.contains(Keyword::Tough) {
            if board.health_disadvantage() {
                b.add("tough while behind", TOUGH_NEED_BONUS);
            }
            if health >= TOUGH_STURDY_HEALTH {
                b.add("tough and sturdy", TOUGH_STURDY_BONUS);
            }
            if board
                .foe_units()
                .iter()
                .any(|u| u.attack >= TOUGH_VS_HITTER_ATTACK)
            {
                b.add("tough vs hitters", TOUGH_VS_HITTER_BONUS);
            }
            if board.foe_first_next_turn() {
                b.add("tough braced", TOUGH_BRACED_BONUS);
            }
        }

        if keywords.contains(Keyword::Overwhelm) {
            self.score_overwhelm(attack, board, &mut b);
        }

        // Keywords without bespoke terms fall through to the generic scorer.
        let generic: f32 = keywords
            .iter()
            .filter(|k| {
                !matches!(k, Keyword::Ranged | Keyword::Tough | Keyword::Overwhelm)
            })
            .map(|k| self.keywords.score(k, true, board))
            .sum();
        b.add("keywords", GENERIC_KEYWORD_WEIGHT * generic);

        b
    }

    fn score_overwhelm(&self, attack: i32, board: &BoardSnapshot, b: &mut ScoreBreakdown) {
        if board.health_advantage() > 0 {
            b.add("overwhelm ahead", OVERWHELM_AHEAD_BONUS);
        }
        if attack >= OVERWHELM_BIG_ATTACK {
            b.add("overwhelm heavy", OVERWHELM_ATTACK_WEIGHT * attack as f32);
        }
        if board
            .foe_units()
            .iter()
            .any(|u| u.health <= OVERWHELM_FRAIL_FOE_HEALTH)
        {
            b.add("frail defenders", OVERWHELM_FRAIL_FOE_BONUS);
        }
        if board.foe_icon().health <= OVERWHELM_LOW_ICON {
            b.add("icon in reach", OVERWHELM_LOW_ICON_BONUS);
        }
        if !board.foe_first_next_turn() {
            b.add("overwhelm tempo", OVERWHELM_TEMPO_BONUS);
        }

        let splash = attack / 2;
        if splash > 0 {
            let kills = board
                .foe_units()
                .iter()
                .filter(|u| u.health <= splash)
                .count();
            let dents = board
                .foe_units()
                .iter()
                .filter(|u| u.health <= 2 * splash)
                .count();
            b.add("splash kills", SPLASH_KILL_WEIGHT * kills as f32);
            b.add("splash dents", SPLASH_DENT_WEIGHT * dents as f32);
            if board.foe_icon().health <= 2 * splash && !board.foe_units().is_empty() {
                b.add("splash finish", SPLASH_FINISH_BONUS);
            }
        }
    }

    fn score_spell<R: OngoingEffects>(
        &self,
        effects: &[Effect],
        board: &BoardSnapshot,
        registry: &R,
    ) -> ScoreBreakdown {
        let mut b = ScoreBreakdown::new();
        let mut card_target: Option<TargetRef> = None;

        for effect in effects {
            let target = self.effects.best_target(effect, board);
            if card_target.is_none() && self.effects.demands_target(effect.kind) {
                card_target = target;
            }
            let raw = self.effects.score(effect, true, target, board, registry);
            let mult = self.timing_multiplier(effect.kind, board);
            b.add(effect_label(effect.kind), raw * mult);
        }

        self.apply_combo(effects, board, &mut b);

        if let Some(target) = card_target {
            b.set_target(target);
        }
        b
    }

    /// Turn-order multiplier for one effect kind.
    fn timing_multiplier(&self, kind: EffectKind, board: &BoardSnapshot) -> f32 {
        let foe_first = board.foe_first_next_turn();
        let foe_low = board.foe_icon().health <= BURST_FINISH_ICON;
        match kind {
            EffectKind::Heal if foe_first => HEAL_BRACE_MULT,
            EffectKind::Damage if foe_low && foe_first => BURST_FINISH_MULT,
            EffectKind::Burn if foe_low && foe_first => BURST_FINISH_MULT,
            EffectKind::Burn if !foe_first => BURN_TEMPO_MULT,
            EffectKind::Draw if !foe_first => DRAW_TEMPO_MULT,
            _ => 1.0,
        }
    }

    /// Draw plus Bloodprice on one card is a deliberate bargain; price it.
    fn apply_combo(&self, effects: &[Effect], board: &BoardSnapshot, b: &mut ScoreBreakdown) {
        let draw = effects
            .iter()
            .find(|e| e.kind == EffectKind::Draw)
            .map(|e| e.value);
        let blood = effects
            .iter()
            .find(|e| e.kind == EffectKind::Bloodprice)
            .map(|e| e.value);
        let (Some(draw), Some(blood)) = (draw, blood) else {
            return;
        };

        if board.own_icon().health < COMBO_RISK_HEALTH && blood > COMBO_RISK_BLOOD {
            b.scale("bargain too dear", COMBO_RISK_MULT);
            if board.foe_first_next_turn() {
                b.scale("and exposed", COMBO_RISK_EXPOSED_MULT);
            }
        } else if blood > 0 && draw as f32 / blood as f32 > COMBO_DRAW_RATIO {
            b.scale("cheap bargain", COMBO_MULT);
        }
    }

    fn strategic_nudge(&self, card: &Card, board: &BoardSnapshot, b: &mut ScoreBreakdown) {
        if board.health_disadvantage() {
            if card.keywords().contains(Keyword::Taunt) {
                b.add("wall while behind", NEED_TAUNT_BONUS);
            }
            if card.effects().iter().any(|e| e.kind == EffectKind::Heal) {
                b.add("heal while behind", NEED_HEAL_BONUS);
            }
        } else {
            if matches!(card.kind, CardKind::Monster { attack, .. } if attack > 0) {
                b.add("press attacker", PRESS_ATTACKER_BONUS);
            }
            if card.effects().iter().any(|e| e.kind == EffectKind::Damage) {
                b.add("press damage", PRESS_DAMAGE_BONUS);
            }
        }
    }
}

fn effect_label(kind: EffectKind) -> &'static str {
    match kind {
        EffectKind::Damage => "damage effect",
        EffectKind::Burn => "burn effect",
        EffectKind::Heal => "heal effect",
        EffectKind::Draw => "draw effect",
        EffectKind::Bloodprice => "bloodprice effect",
        EffectKind::Shield => "shield effect",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EffectProfile, KeywordProfile};
    use crate::core::{CardId, Side, Unit, UnitId};
    use crate::host::SimBattle;

    fn scorers() -> (KeywordScorer, EffectScorer) {
        (
            KeywordScorer::new(KeywordProfile::default_table()),
            EffectScorer::new(EffectProfile::default_table()),
        )
    }

    fn foe_unit(id: u32, attack: i32, health: i32) -> Unit {
        Unit {
            id: UnitId::new(id),
            side: Side::Player,
            slot: 0,
            attack,
            health,
            max_health: health,
            keywords: KeywordSet::new(),
            pending_burn: 0,
        }
    }

    fn monster(cost: i32, attack: i32, health: i32, keywords: KeywordSet) -> Card {
        Card::monster(CardId::new(1), "Test Monster", cost, attack, health, keywords)
    }

    #[test]
    fn test_monster_stat_base() {
        let (kw, ef) = scorers();
        let scorer = CardScorer::new(&kw, &ef);
        let registry = SimBattle::new();
        let board = BoardSnapshot::new(Side::Enemy).with_mana(Side::Enemy, 3);

        let score = scorer.score(&monster(3, 4, 2, KeywordSet::new()), &board, &registry);
        // stats 4 + 1.4, glass cannon -10, mana efficiency 0, press attacker +20.
        assert!((score.total() - (5.4 - 10.0 + 20.0)).abs() < 1e-3, "{score}");
    }

    #[test]
    fn test_mana_efficiency_term() {
        let (kw, ef) = scorers();
        let scorer = CardScorer::new(&kw, &ef);
        let registry = SimBattle::new();
        let rich = BoardSnapshot::new(Side::Enemy).with_mana(Side::Enemy, 6);
        let tight = BoardSnapshot::new(Side::Enemy).with_mana(Side::Enemy, 3);

        let card = monster(3, 1, 1, KeywordSet::new());
        let cheap = scorer.score(&card, &rich, &registry).total();
        let strained = scorer.score(&card, &tight, &registry).total();
        // 50*(1 - 3/6) = 25 vs 50*(1 - 3/3) = 0.
        assert!((cheap - strained - 25.0).abs() < 1e-3);
    }

    #[test]
    fn test_ranged_terms() {
        let (kw, ef) = scorers();
        let scorer = CardScorer::new(&kw, &ef);
        let registry = SimBattle::new();
        let board = BoardSnapshot::new(Side::Enemy)
            .with_mana(Side::Enemy, 5)
            .with_first_next_turn(Side::Player);

        let ranged = KeywordSet::new().with(Keyword::Ranged);
        let sniper = scorer.score(&monster(2, 4, 2, ranged), &board, &registry);
        let plain = scorer.score(&monster(2, 4, 2, KeywordSet::new()), &board, &registry);

        // Ranged swaps the glass-cannon penalty for +30 ranged, +20 sniper
        // (4/2 > 1.5), -15 exposed with the opponent up next.
        let expected_gap = (30.0 + 20.0 - 15.0) - (-10.0);
        assert!(
            (sniper.total() - plain.total() - expected_gap).abs() < 1e-3,
            "{sniper} vs {plain}"
        );
    }

    #[test]
    fn test_tough_terms_stack() {
        let (kw, ef) = scorers();
        let scorer = CardScorer::new(&kw, &ef);
        let registry = SimBattle::new();
        let board = BoardSnapshot::new(Side::Enemy)
            .with_icon(Side::Enemy, 10, 30)
            .with_icon(Side::Player, 20, 30)
            .with_first_next_turn(Side::Player)
            .with_unit(foe_unit(1, 5, 5))
            .with_mana(Side::Enemy, 4);

        let tough = KeywordSet::new().with(Keyword::Tough);
        let armored = scorer.score(&monster(4, 2, 4, tough), &board, &registry);
        let bare = scorer.score(&monster(4, 2, 4, KeywordSet::new()), &board, &registry);

        // +25 behind, +15 sturdy, +20 vs a 4-attack foe, +20 braced.
        assert!(
            (armored.total() - bare.total() - 80.0).abs() < 1e-3,
            "{armored} vs {bare}"
        );
    }

    #[test]
    fn test_overwhelm_splash_terms() {
        let (kw, ef) = scorers();
        let scorer = CardScorer::new(&kw, &ef);
        let registry = SimBattle::new();
        let board = BoardSnapshot::new(Side::Enemy)
            .with_mana(Side::Enemy, 6)
            .with_first_next_turn(Side::Enemy)
            .with_unit(foe_unit(1, 1, 2))
            .with_unit(foe_unit(2, 1, 2))
            .with_unit(foe_unit(3, 1, 5));

        let overwhelm = KeywordSet::new().with(Keyword::Overwhelm);
        let crusher = scorer.score(&monster(5, 6, 4, overwhelm), &board, &registry);
        let bare = scorer.score(&monster(5, 6, 4, KeywordSet::new()), &board, &registry);

        // Splash 3: two kills (+40), three dents at <=6 (+30), +25 frail
        // defenders, +15 heavy (2.5*6), +30 tempo with us up next.
        let expected_gap = 40.0 + 30.0 + 25.0 + 15.0 + 30.0;
        assert!(
            (crusher.total() - bare.total() - expected_gap).abs() < 1e-3,
            "{crusher} vs {bare}"
        );
    }

    #[test]
    fn test_taunt_uses_generic_keyword_path() {
        let (kw, ef) = scorers();
        let scorer = CardScorer::new(&kw, &ef);
        let registry = SimBattle::new();
        let board = BoardSnapshot::new(Side::Enemy).with_mana(Side::Enemy, 3);

        let taunt = KeywordSet::new().with(Keyword::Taunt);
        let wall = scorer.score(&monster(3, 2, 5, taunt), &board, &registry);
        let bare = scorer.score(&monster(3, 2, 5, KeywordSet::new()), &board, &registry);

        // 1.2 * keyword score (base 30, level board) = 36.
        assert!((wall.total() - bare.total() - 36.0).abs() < 1e-3);
    }

    #[test]
    fn test_spell_press_damage() {
        let (kw, ef) = scorers();
        let scorer = CardScorer::new(&kw, &ef);
        let registry = SimBattle::new();
        let board = BoardSnapshot::new(Side::Enemy)
            .with_mana(Side::Enemy, 3)
            .with_unit(foe_unit(1, 2, 6));

        let bolt = Card::spell(CardId::new(2), "Bolt", 2, [Effect::damage(3)]);
        let score = scorer.score(&bolt, &board, &registry);
        // damage base 40, mana 50*(1-2/3), press damage +30.
        assert!((score.total() - (40.0 + 50.0 / 3.0 + 30.0)).abs() < 1e-2, "{score}");
        assert_eq!(score.target(), Some(TargetRef::Unit(UnitId::new(1))));
    }

    #[test]
    fn test_heal_brace_multiplier() {
        let (kw, ef) = scorers();
        let scorer = CardScorer::new(&kw, &ef);
        let registry = SimBattle::new();

        let exposed = BoardSnapshot::new(Side::Enemy)
            .with_mana(Side::Enemy, 2)
            .with_first_next_turn(Side::Player);
        let safe = BoardSnapshot::new(Side::Enemy)
            .with_mana(Side::Enemy, 2)
            .with_first_next_turn(Side::Enemy);

        let salve = Card::spell(CardId::new(3), "Salve", 2, [Effect::heal(4)]);
        let braced = scorer.score(&salve, &exposed, &registry).total();
        let relaxed = scorer.score(&salve, &safe, &registry).total();
        // Heal 35 scaled by 1.3 when the opponent is up next.
        assert!((braced - relaxed - 35.0 * 0.3).abs() < 1e-3);
    }

    #[test]
    fn test_dark_bargain_combo() {
        let (kw, ef) = scorers();
        let scorer = CardScorer::new(&kw, &ef);
        let registry = SimBattle::new();

        let bargain = Card::spell(
            CardId::new(4),
            "Dark Bargain",
            1,
            [Effect::draw(4), Effect::bloodprice(2)],
        );

        let healthy = BoardSnapshot::new(Side::Enemy)
            .with_mana(Side::Enemy, 1)
            .with_first_next_turn(Side::Enemy);
        let happy = scorer.score(&bargain, &healthy, &registry);
        assert!(
            happy
                .terms()
                .iter()
                .any(|t| t.label == "cheap bargain"),
            "{happy}"
        );

        let dying = BoardSnapshot::new(Side::Enemy)
            .with_icon(Side::Enemy, 10, 30)
            .with_mana(Side::Enemy, 1);
        let risky_card = Card::spell(
            CardId::new(5),
            "Deep Bargain",
            1,
            [Effect::draw(7), Effect::bloodprice(4)],
        );
        let grim = scorer.score(&risky_card, &dying, &registry);
        assert!(
            grim.terms().iter().any(|t| t.label == "bargain too dear"),
            "{grim}"
        );
    }
}
