//! One parsed ability: spans, tags, atoms, and micro-structure.
//!
//! Assembly runs per clause: classify the tier, split into sub-spans, run
//! the micro-grammar and the tag/atom derivation on each populated
//! sub-span, attach actor/target string tags, and drop the clause when it
//! produced nothing at all (pure reminder or flavor text).

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::action::{ActionUnit, extract_action_units};
use crate::atom::Atom;
use crate::clause::{
    EffectTier, guess_effect_type, split_abilities, split_cost_clause, split_trigger_clause,
};
use crate::derive::{
    infer_actor_tags, infer_target_tags, parse_cost_atoms, parse_cost_tags, parse_result_atoms,
    parse_result_tags, parse_trigger_tags,
};
use crate::keywords::{KeywordHit, extract_keyword_hits};
use crate::tags::EventTag;
use crate::themes::detect_text_themes;

/// One parsed ability belonging to a card.
///
/// A triggered effect always has `trigger_text`; an activated effect
/// always has `cost_text`. The trigger/cost span and the result span are
/// non-overlapping substrings of `raw_text`.
#[derive(Debug, Clone)]
pub struct Effect {
    pub raw_text: String,
    pub effect_type: EffectTier,

    pub trigger_text: Option<String>,
    pub cost_text: Option<String>,
    pub result_text: String,

    pub trigger_tags: FxHashSet<EventTag>,
    pub cost_tags: FxHashSet<EventTag>,
    pub result_tags: FxHashSet<EventTag>,

    pub trigger_atoms: Vec<Atom>,
    pub cost_atoms: Vec<Atom>,
    pub result_atoms: Vec<Atom>,

    pub trigger_actions: Vec<ActionUnit>,
    pub cost_actions: Vec<ActionUnit>,
    pub result_actions: Vec<ActionUnit>,

    pub actor_tags: BTreeSet<String>,
    pub target_tags: BTreeSet<String>,

    pub keyword_hits: Vec<KeywordHit>,
}

impl Effect {
    /// Themes this effect's text matches on its own.
    pub fn infer_theme_tags(&self) -> BTreeSet<&'static str> {
        detect_text_themes(&self.raw_text)
    }

    fn is_empty(&self) -> bool {
        self.trigger_tags.is_empty()
            && self.cost_tags.is_empty()
            && self.result_tags.is_empty()
            && self.trigger_atoms.is_empty()
            && self.cost_atoms.is_empty()
            && self.result_atoms.is_empty()
    }
}

/// Parses oracle text into effects, one per surviving clause.
///
/// Triggered clauses split into trigger and result, activated clauses
/// into cost and result, everything else is all result. Clauses whose
/// sub-spans yield no tags and no atoms are dropped.
pub fn parse_effects_from_text(oracle_text: &str, card_name: Option<&str>) -> Vec<Effect> {
    if oracle_text.is_empty() {
        return Vec::new();
    }

    let mut effects = Vec::new();

    for ability in split_abilities(oracle_text) {
        let clause = ability.trim();
        if clause.is_empty() {
            continue;
        }

        let cl = clause.to_lowercase();
        let effect_type = guess_effect_type(clause);

        let mut trigger_text: Option<String> = None;
        let mut cost_text: Option<String> = None;
        let mut result_text: String = clause.to_string();

        let mut trigger_tags: FxHashSet<EventTag> = FxHashSet::default();
        let mut cost_tags: FxHashSet<EventTag> = FxHashSet::default();
        let mut result_tags: FxHashSet<EventTag> = FxHashSet::default();

        let mut trigger_actions: Vec<ActionUnit> = Vec::new();
        let mut cost_actions: Vec<ActionUnit> = Vec::new();
        let mut result_actions: Vec<ActionUnit> = Vec::new();

        let keyword_hits = extract_keyword_hits(clause);

        match effect_type {
            EffectTier::Triggered => {
                let (trigger, result) = split_trigger_clause(clause);
                trigger_text = trigger;
                result_text = result;
                if let Some(trigger) = trigger_text.as_deref() {
                    trigger_actions = extract_action_units(trigger, card_name);
                    trigger_tags.extend(parse_trigger_tags(trigger, card_name));
                }
                if !result_text.is_empty() {
                    result_actions = extract_action_units(&result_text, card_name);
                    result_tags.extend(parse_result_tags(&result_text, card_name));
                }
            }
            EffectTier::Activated => {
                let (cost, result) = split_cost_clause(clause);
                cost_text = cost;
                result_text = result;
                if let Some(cost) = cost_text.as_deref() {
                    cost_actions = extract_action_units(cost, card_name);
                    cost_tags.extend(parse_cost_tags(cost));
                }
                if !result_text.is_empty() {
                    result_actions = extract_action_units(&result_text, card_name);
                    result_tags.extend(parse_result_tags(&result_text, card_name));
                }
            }
            EffectTier::Replacement | EffectTier::Static => {
                result_actions = extract_action_units(&result_text, card_name);
                result_tags.extend(parse_result_tags(&result_text, card_name));
            }
        }

        let mut actor_tags = infer_actor_tags(&cl);
        let target_tags = infer_target_tags(&cl);

        // Activated abilities are controlled by you by default.
        if effect_type == EffectTier::Activated {
            actor_tags.insert("YOU".to_string());
        }

        let cost_atoms = cost_text
            .as_deref()
            .map(parse_cost_atoms)
            .unwrap_or_default();
        let result_atoms = if result_text.is_empty() {
            Vec::new()
        } else {
            parse_result_atoms(&result_text, card_name)
        };

        let effect = Effect {
            raw_text: clause.to_string(),
            effect_type,
            trigger_text,
            cost_text,
            result_text,
            trigger_tags,
            cost_tags,
            result_tags,
            trigger_atoms: Vec::new(),
            cost_atoms,
            result_atoms,
            trigger_actions,
            cost_actions,
            result_actions,
            actor_tags,
            target_tags,
            keyword_hits,
        };

        // Pure reminder / flavor clauses contribute nothing; drop them.
        if effect.is_empty() {
            trace!(clause, "clause produced no tags or atoms; dropped");
            continue;
        }

        effects.push(effect);
    }

    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{EventKind, Resource, Scope};

    fn tag(kind: EventKind, resource: Resource, scope: Scope) -> EventTag {
        EventTag::new(kind, resource, scope)
    }

    #[test]
    fn test_triggered_effect_splits_and_tags() {
        let effects =
            parse_effects_from_text("Whenever a creature you control dies, draw a card.", None);
        assert_eq!(effects.len(), 1);

        let effect = &effects[0];
        assert_eq!(effect.effect_type, EffectTier::Triggered);
        assert_eq!(
            effect.trigger_text.as_deref(),
            Some("Whenever a creature you control dies")
        );
        assert_eq!(effect.result_text, "draw a card.");
        assert!(effect.result_tags.contains(&tag(
            EventKind::Draw,
            Resource::Card,
            Scope::You
        )));
        assert!(effect.trigger_tags.contains(&tag(
            EventKind::Dies,
            Resource::Permanent,
            Scope::YourPermanent
        )));
    }

    #[test]
    fn test_activated_effect_has_cost_text_and_actions() {
        let effects = parse_effects_from_text("Sacrifice a creature: Draw two cards.", None);
        assert_eq!(effects.len(), 1);

        let effect = &effects[0];
        assert_eq!(effect.effect_type, EffectTier::Activated);
        assert_eq!(effect.cost_text.as_deref(), Some("Sacrifice a creature"));
        assert_eq!(effect.result_text, "Draw two cards.");

        let draw = effect
            .result_actions
            .iter()
            .find(|unit| unit.verb == "draw")
            .expect("draw action unit");
        assert_eq!(draw.quantity, Some(2));
        assert_eq!(
            draw.kind.map(|k| k.as_str()),
            Some("DRAW_CARD")
        );

        // Activated implies YOU as actor.
        assert!(effect.actor_tags.contains("YOU"));
    }

    #[test]
    fn test_reminder_text_produces_no_effect() {
        let effects = parse_effects_from_text(
            "(This is reminder prose with no recognizable pattern whatsoever.)",
            None,
        );
        assert!(effects.is_empty());
    }

    #[test]
    fn test_invariants_triggered_has_trigger_activated_has_cost() {
        let text = "Whenever you gain life, scry 1.\n{T}: Add {G}.";
        let effects = parse_effects_from_text(text, None);
        for effect in &effects {
            match effect.effect_type {
                EffectTier::Triggered => assert!(effect.trigger_text.is_some()),
                EffectTier::Activated => assert!(effect.cost_text.is_some()),
                _ => {}
            }
        }
    }

    #[test]
    fn test_spans_do_not_overlap() {
        let effects =
            parse_effects_from_text("Whenever a creature you control dies, draw a card.", None);
        let effect = &effects[0];
        let trigger = effect.trigger_text.as_deref().unwrap();
        // Trigger and result are disjoint substrings of the raw clause.
        assert!(effect.raw_text.starts_with(trigger));
        assert!(effect.raw_text.ends_with(&effect.result_text));
        assert!(trigger.len() + effect.result_text.len() < effect.raw_text.len());
    }

    #[test]
    fn test_no_comma_trigger_has_empty_result() {
        let effects = parse_effects_from_text(
            "Whenever a creature you control dies this turn draw a card.",
            None,
        );
        assert_eq!(effects.len(), 1);
        let effect = &effects[0];
        assert!(effect.result_text.is_empty());
        assert!(effect.result_tags.is_empty());
        // The trigger still tagged, so the effect survives.
        assert!(!effect.trigger_tags.is_empty());
    }

    #[test]
    fn test_idempotent_parsing() {
        let text = "Whenever you gain life, draw a card.\n{T}, Pay 2 life: Add {B}{B}.";
        let first = parse_effects_from_text(text, Some("Test Card"));
        let second = parse_effects_from_text(text, Some("Test Card"));
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.raw_text, b.raw_text);
            assert_eq!(a.effect_type, b.effect_type);
            assert_eq!(a.trigger_tags, b.trigger_tags);
            assert_eq!(a.cost_tags, b.cost_tags);
            assert_eq!(a.result_tags, b.result_tags);
            assert_eq!(a.trigger_atoms, b.trigger_atoms);
            assert_eq!(a.cost_atoms, b.cost_atoms);
            assert_eq!(a.result_atoms, b.result_atoms);
        }
    }

    #[test]
    fn test_multiple_abilities_multiple_effects() {
        let text = "Whenever you gain life, scry 1.\nSacrifice a creature: You gain 2 life.";
        let effects = parse_effects_from_text(text, None);
        assert_eq!(effects.len(), 2);
        assert_eq!(effects[0].effect_type, EffectTier::Triggered);
        assert_eq!(effects[1].effect_type, EffectTier::Activated);
    }
}
