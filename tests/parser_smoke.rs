//! End-to-end parsing scenarios over short oracle texts.

use cardsift::card::card_from_row;
use cardsift::clause::{EffectTier, classify_tier};
use cardsift::corpus::CardRow;
use cardsift::effect::parse_effects_from_text;
use cardsift::vocab::{Cause, EventKind, ObjKind, Resource, Scope, Zone};
use cardsift::{Atom, EventTag};

fn tag(kind: EventKind, resource: Resource, scope: Scope) -> EventTag {
    EventTag::new(kind, resource, scope)
}

#[test]
fn replacement_wins_over_triggered() {
    let tier = classify_tier("If a creature you control would die, instead exile it.");
    assert_eq!(tier, Some(EffectTier::Replacement));
}

#[test]
fn triggered_death_draw_scenario() {
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
    assert!(effect
        .result_tags
        .contains(&tag(EventKind::Draw, Resource::Card, Scope::You)));
    assert!(effect
        .trigger_tags
        .contains(&tag(EventKind::Dies, Resource::Permanent, Scope::YourPermanent)));
}

#[test]
fn activated_sacrifice_draw_scenario() {
    let effects = parse_effects_from_text("Sacrifice a creature: Draw two cards.", None);
    assert_eq!(effects.len(), 1);

    let effect = &effects[0];
    assert_eq!(effect.effect_type, EffectTier::Activated);

    let sacrifice_move = effect.cost_atoms.iter().find_map(|atom| match atom {
        Atom::ZoneMove(m) => Some(m),
        _ => None,
    });
    let sacrifice_move = sacrifice_move.expect("sacrifice cost atom");
    assert_eq!(sacrifice_move.from_zone, Zone::Battlefield);
    assert_eq!(sacrifice_move.to_zone, Zone::Graveyard);
    assert_eq!(sacrifice_move.obj, ObjKind::Permanent);
    assert_eq!(sacrifice_move.cause, Cause::Sacrifice);

    let draw = effect
        .result_actions
        .iter()
        .find(|unit| unit.verb == "draw")
        .expect("draw action unit");
    assert_eq!(draw.quantity, Some(2));
    assert_eq!(draw.kind.map(|k| k.as_str()), Some("DRAW_CARD"));
}

#[test]
fn choice_mana_takes_maximum_option() {
    let effects = parse_effects_from_text("Add {G} or {U}.", None);
    assert_eq!(effects.len(), 1);

    let mana: Vec<_> = effects[0]
        .result_atoms
        .iter()
        .filter_map(|atom| match atom {
            Atom::ResourceDelta(delta) if delta.resource == "mana" => Some(delta),
            _ => None,
        })
        .collect();
    assert_eq!(mana.len(), 1);
    assert_eq!(mana[0].delta, 1);
    assert_eq!(mana[0].subtype.as_deref(), Some("G|U"));
}

#[test]
fn reminder_only_clause_yields_no_effects() {
    let effects = parse_effects_from_text(
        "(A clause of pure reminder prose, with no recognizable pattern.)",
        None,
    );
    assert!(effects.is_empty());
}

#[test]
fn no_comma_trigger_yields_zero_result_tags() {
    let effects = parse_effects_from_text("Whenever a creature you control dies this turn", None);
    assert_eq!(effects.len(), 1);
    assert!(effects[0].result_text.is_empty());
    assert!(effects[0].result_tags.is_empty());
}

#[test]
fn parsing_is_idempotent() {
    let row = CardRow {
        name: "Repeatable Study".to_string(),
        oracle_text: Some(
            "Whenever you gain life, draw a card.\n{T}, Pay 2 life: Add {B}{B}.".to_string(),
        ),
        type_line: Some("Enchantment".to_string()),
        ..Default::default()
    };

    let first = card_from_row(&row);
    let second = card_from_row(&row);

    assert_eq!(first.name, second.name);
    assert_eq!(first.effects.len(), second.effects.len());
    for (a, b) in first.effects.iter().zip(second.effects.iter()) {
        assert_eq!(a.raw_text, b.raw_text);
        assert_eq!(a.effect_type, b.effect_type);
        assert_eq!(a.trigger_text, b.trigger_text);
        assert_eq!(a.cost_text, b.cost_text);
        assert_eq!(a.result_text, b.result_text);
        assert_eq!(a.trigger_tags, b.trigger_tags);
        assert_eq!(a.cost_tags, b.cost_tags);
        assert_eq!(a.result_tags, b.result_tags);
        assert_eq!(a.trigger_atoms, b.trigger_atoms);
        assert_eq!(a.cost_atoms, b.cost_atoms);
        assert_eq!(a.result_atoms, b.result_atoms);
        assert_eq!(a.actor_tags, b.actor_tags);
        assert_eq!(a.target_tags, b.target_tags);
    }
}

#[test]
fn tap_cost_emits_state_atom_not_mana() {
    let effects = parse_effects_from_text("{T}: Draw a card.", None);
    assert_eq!(effects.len(), 1);

    let effect = &effects[0];
    assert!(effect
        .cost_atoms
        .iter()
        .any(|atom| matches!(atom, Atom::StateDelta(_))));
    assert!(!effect.cost_atoms.iter().any(|atom| matches!(
        atom,
        Atom::ResourceDelta(delta) if delta.resource == "mana"
    )));
}

#[test]
fn multi_line_oracle_text_yields_one_effect_per_ability() {
    let text = "Whenever you gain life, scry 1.\nSacrifice a creature: You gain 2 life.\nFlying";
    let effects = parse_effects_from_text(text, None);
    // Flying alone carries no tags or atoms and is dropped.
    assert_eq!(effects.len(), 2);
}
