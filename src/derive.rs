//! Tag and atom derivation from trigger, cost, and result sub-spans.
//!
//! Two parallel passes over the same text: the action-unit mapping turns
//! resolved [`ActionKind`]s into tags and atoms deterministically, and an
//! ordered list of raw-text fallbacks catches phrasing the micro-grammar
//! misses ("scry", "return ... to the battlefield", inflected verbs).
//! Scope is decided per pattern by literal substring tests — an
//! intentional simplification, not pronoun resolution.
//!
//! Cost atoms and result atoms are derived independently and must never be
//! merged: mana with a negative delta in a cost section means the ability
//! is paid with mana, while a positive delta in a result section means it
//! produces mana. Synergy scoring depends on that separation.

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;

use crate::action::{ActionKind, extract_action_units};
use crate::atom::{Atom, ResourceDelta, StateDelta, ZoneMove};
use crate::mana::{is_state_symbol, mana_from_add_clause, mana_symbols, mana_value_of};
use crate::tags::EventTag;
use crate::vocab::{Cause, EventKind, ObjKind, Resource, Scope, Source, Step, Zone};

fn ev(kind: EventKind, resource: Resource, scope: Scope) -> EventTag {
    EventTag::new(kind, resource, scope)
}

/// Lowercase word tokens, punctuation stripped.
fn words_of(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn contains_word(text: &str, word: &str) -> bool {
    words_of(text).iter().any(|w| w == word)
}

/// Wildcard matcher for `subject … verb-family … object` within one
/// sentence: `'you gain life'`, `'target opponent loses 3 life'`. The
/// verb matches any inflection of the root (gain, gains, gained); the
/// subject may span several words.
fn subject_verb_object(text: &str, subject: &str, verb_root: &str, obj_word: &str) -> bool {
    let subject_words = words_of(subject);
    if subject_words.is_empty() {
        return false;
    }

    for sentence in text.split('.') {
        let sentence_words = words_of(sentence);
        if sentence_words.len() < subject_words.len() {
            continue;
        }

        for start in 0..=(sentence_words.len() - subject_words.len()) {
            if sentence_words[start..start + subject_words.len()] != subject_words[..] {
                continue;
            }
            let after_subject = start + subject_words.len();
            let Some(verb_idx) = sentence_words[after_subject..]
                .iter()
                .position(|w| w.starts_with(verb_root))
                .map(|offset| after_subject + offset)
            else {
                continue;
            };
            if sentence_words[verb_idx + 1..].iter().any(|w| w == obj_word) {
                return true;
            }
        }
    }

    false
}

/// Actor string tags from fixed substring heuristics.
pub fn infer_actor_tags(cl: &str) -> BTreeSet<String> {
    let mut actors = BTreeSet::new();

    if cl.starts_with("you ") || cl.contains(" you ") || cl.contains(" your ") {
        actors.insert("YOU".to_string());
    }
    if cl.contains("each opponent") {
        actors.insert("EACH_OPPONENT".to_string());
    }
    if cl.contains("each player") {
        actors.insert("EACH_PLAYER".to_string());
    }
    if cl.contains("target opponent") || cl.contains("an opponent") {
        actors.insert("OPPONENT".to_string());
    }

    actors
}

/// Target string tags from fixed substring heuristics.
pub fn infer_target_tags(cl: &str) -> BTreeSet<String> {
    let mut targets = BTreeSet::new();

    if cl.contains("another target creature you control") {
        targets.insert("ANOTHER_CREATURE_YOU_CONTROL".to_string());
    } else if cl.contains("creature you control") {
        targets.insert("CREATURE_YOU_CONTROL".to_string());
    }

    if cl.contains("token you control") || cl.contains("tokens you control") {
        targets.insert("TOKEN_YOU_CONTROL".to_string());
    }

    if cl.contains("target creature or enchantment you control") {
        targets.insert("CREATURE_OR_ENCHANTMENT_YOU_CONTROL".to_string());
    }

    if cl.contains("any target") {
        targets.insert("ANY_TARGET".to_string());
    } else if cl.contains("target creature") {
        targets.insert("ANY_CREATURE".to_string());
    }

    if cl.contains("target player") {
        targets.insert("ANY_PLAYER".to_string());
    }

    targets
}

/// Converts a trigger sub-span into event tags.
pub fn parse_trigger_tags(trigger_text: &str, card_name: Option<&str>) -> FxHashSet<EventTag> {
    let mut tags = FxHashSet::default();
    let tl = trigger_text.to_lowercase();
    let units = extract_action_units(trigger_text, card_name);

    // Upkeep-style hooks (generic recurring trigger).
    if tl.contains("at the beginning of your upkeep") {
        tags.insert(ev(EventKind::Step, Resource::Permanent, Scope::You).at_step(Step::Upkeep));
    }

    // Casting triggers: "Whenever you cast a spell", "Whenever an opponent
    // casts...".
    let padded = format!(" {tl} ");
    if padded.contains(" cast ") && tl.contains("spell") {
        if tl.contains("you cast") {
            tags.insert(ev(EventKind::Cast, Resource::Card, Scope::You));
        } else if tl.contains("each opponent casts")
            || tl.contains("an opponent casts")
            || tl.contains("opponent casts")
        {
            tags.insert(ev(EventKind::Cast, Resource::Card, Scope::Opponent));
        } else if tl.contains("each player casts") || tl.contains("a player casts") {
            tags.insert(ev(EventKind::Cast, Resource::Card, Scope::AnyPlayer));
        }
    }

    // Action-unit fallback when the micro-grammar resolved CAST_SPELL.
    for unit in &units {
        if unit.kind == Some(ActionKind::CastSpell) {
            if tl.contains("you cast") {
                tags.insert(ev(EventKind::Cast, Resource::Card, Scope::You));
            } else if tl.contains("opponent casts") {
                tags.insert(ev(EventKind::Cast, Resource::Card, Scope::Opponent));
            } else {
                tags.insert(ev(EventKind::Cast, Resource::Card, Scope::AnyPlayer));
            }
        }
    }

    // Draw and lifegain triggers.
    if subject_verb_object(&tl, "you", "draw", "card") {
        tags.insert(ev(EventKind::Draw, Resource::Card, Scope::You));
    }
    if subject_verb_object(&tl, "you", "gain", "life") {
        tags.insert(ev(EventKind::Gain, Resource::Life, Scope::You));
    }

    // Opponent life-loss triggers.
    if subject_verb_object(&tl, "opponent", "lose", "life")
        || subject_verb_object(&tl, "each opponent", "lose", "life")
        || subject_verb_object(&tl, "an opponent", "lose", "life")
        || subject_verb_object(&tl, "target opponent", "lose", "life")
    {
        tags.insert(ev(EventKind::Lose, Resource::Life, Scope::Opponent));
    }

    // Death triggers.
    if tl.contains("creature you control dies") || tl.contains("another creature you control dies")
    {
        tags.insert(ev(EventKind::Dies, Resource::Permanent, Scope::YourPermanent));
    }
    if tl.contains("creature an opponent controls dies")
        || tl.contains("another creature an opponent controls dies")
    {
        tags.insert(ev(EventKind::Dies, Resource::Permanent, Scope::Opponent));
    }
    if tl.contains("dies")
        && tl.contains("creature")
        && !tags.iter().any(|t| t.kind == EventKind::Dies)
    {
        tags.insert(ev(EventKind::Dies, Resource::Permanent, Scope::AnyPermanent));
    }
    if tl.contains("put into your graveyard from the battlefield") && tl.contains("creature") {
        tags.insert(ev(EventKind::Dies, Resource::Permanent, Scope::YourPermanent));
    }

    // Enters-the-battlefield variants.
    if tl.contains("this creature enters") {
        tags.insert(ev(EventKind::Enters, Resource::Permanent, Scope::YourPermanent));
    }
    if tl.contains("enters") && tl.contains("you control") {
        let resource = if tl.contains("token") {
            Resource::Token
        } else {
            Resource::Permanent
        };
        tags.insert(ev(EventKind::Enters, resource, Scope::YourPermanent));
    }
    if tl.contains("enters the battlefield under your control") {
        let resource = if tl.contains("token") {
            Resource::Token
        } else {
            Resource::Permanent
        };
        tags.insert(ev(EventKind::Enters, resource, Scope::YourPermanent));
    } else if tl.contains("enters the battlefield") {
        tags.insert(ev(EventKind::Enters, Resource::Permanent, Scope::AnyPermanent));
    }

    tags
}

/// Converts a cost sub-span (left of `:` in an activated ability) into
/// event tags.
pub fn parse_cost_tags(cost_text: &str) -> FxHashSet<EventTag> {
    let mut tags = FxHashSet::default();
    let cl = cost_text.to_lowercase();

    let has_mana_payment = mana_symbols(cost_text)
        .iter()
        .any(|s| !is_state_symbol(s));
    if has_mana_payment {
        tags.insert(ev(EventKind::Lose, Resource::Mana, Scope::You));
    }

    if cl.contains("sacrifice") {
        tags.insert(ev(EventKind::Sacrifice, Resource::Permanent, Scope::YourPermanent));
    }
    if cl.contains("discard") && cl.contains("card") {
        tags.insert(ev(EventKind::Lose, Resource::Card, Scope::You));
    }
    if cl.contains("pay") && cl.contains("life") {
        tags.insert(ev(EventKind::Lose, Resource::Life, Scope::You));
    }
    if cl.contains("remove a +1/+1 counter") || cl.contains("remove a counter") {
        tags.insert(ev(EventKind::Lose, Resource::Counter, Scope::YourPermanent));
    }

    tags
}

/// Converts a result sub-span into event tags, combining the action-unit
/// mapping with the ordered raw-text fallbacks.
pub fn parse_result_tags(result_text: &str, card_name: Option<&str>) -> FxHashSet<EventTag> {
    let mut tags = FxHashSet::default();
    let cl = result_text.to_lowercase();
    let units = extract_action_units(result_text, card_name);

    // 1) Action-unit-driven mapping.
    for unit in &units {
        match unit.kind {
            Some(ActionKind::DrawCard) => {
                tags.insert(ev(EventKind::Draw, Resource::Card, Scope::You));
            }
            Some(ActionKind::CreateToken) => {
                tags.insert(ev(EventKind::Create, Resource::Token, Scope::You));
            }
            Some(ActionKind::GainLife) => {
                let scope = if cl.contains("each opponent gains")
                    || cl.contains("target opponent gains")
                {
                    Scope::Opponent
                } else {
                    Scope::You
                };
                tags.insert(ev(EventKind::Gain, Resource::Life, scope));
            }
            Some(ActionKind::LoseLife) => {
                let scope = if cl.contains("target opponent")
                    || cl.contains("each opponent")
                    || cl.contains("opponent loses")
                {
                    Scope::Opponent
                } else {
                    Scope::You
                };
                tags.insert(ev(EventKind::Lose, Resource::Life, scope));
            }
            Some(ActionKind::DealDamage) => {
                let scope = match unit.target.as_deref() {
                    Some(target) if target.contains("opponent") => Scope::Opponent,
                    _ => Scope::AnyPlayer,
                };
                tags.insert(ev(EventKind::Deal, Resource::Damage, scope));
            }
            Some(ActionKind::AddMana) => {
                tags.insert(ev(EventKind::Add, Resource::Mana, Scope::You));
            }
            Some(ActionKind::AddCounter) => {
                tags.insert(ev(EventKind::Add, Resource::Counter, Scope::YourPermanent));
            }
            Some(ActionKind::RemoveCounter) => {
                tags.insert(ev(EventKind::Lose, Resource::Counter, Scope::YourPermanent));
            }
            Some(ActionKind::SacrificeCreature) => {
                tags.insert(ev(EventKind::Sacrifice, Resource::Permanent, Scope::YourPermanent));
            }
            _ => {}
        }
    }

    // 2) Raw-text fallbacks for phrasing the units miss.

    // Tutors and dig: putting cards into hand reads as draw-ish.
    if cl.contains("into your hand") && (cl.contains("card") || cl.contains("cards"))
        && cl.contains("put")
    {
        tags.insert(ev(EventKind::Draw, Resource::Card, Scope::You));
    }

    // Scry is card selection, soft card advantage.
    if cl.contains("scry") {
        tags.insert(ev(EventKind::Draw, Resource::Card, Scope::You));
    }

    if subject_verb_object(&cl, "you", "draw", "card") {
        tags.insert(ev(EventKind::Draw, Resource::Card, Scope::You));
    }
    if subject_verb_object(&cl, "you", "gain", "life") {
        tags.insert(ev(EventKind::Gain, Resource::Life, Scope::You));
    }
    if subject_verb_object(&cl, "target opponent", "lose", "life")
        || subject_verb_object(&cl, "each opponent", "lose", "life")
        || subject_verb_object(&cl, "an opponent", "lose", "life")
        || subject_verb_object(&cl, "opponent", "lose", "life")
    {
        tags.insert(ev(EventKind::Lose, Resource::Life, Scope::Opponent));
    }

    if cl.contains("each opponent sacrifices a creature") {
        tags.insert(ev(EventKind::Sacrifice, Resource::Permanent, Scope::Opponent));
    }

    // Discard as result.
    if cl.contains("each opponent") && cl.contains("discards") {
        tags.insert(ev(EventKind::Lose, Resource::Card, Scope::Opponent));
    }
    if cl.contains("target opponent discards") || cl.contains("target player discards") {
        tags.insert(ev(EventKind::Lose, Resource::Card, Scope::AnyPlayer));
    }

    // Damage, including inflected "deals" the verb lexicon skips.
    if subject_verb_object(&cl, "it", "deal", "damage")
        || (cl.contains("deals") && cl.contains("damage"))
    {
        tags.insert(ev(EventKind::Deal, Resource::Damage, Scope::AnyPlayer));
    }

    // Mana production: lands, rocks, rituals.
    if cl.contains("add") && cl.contains("mana") {
        tags.insert(ev(EventKind::Add, Resource::Mana, Scope::You));
    }
    if cl.contains("add {") {
        tags.insert(ev(EventKind::Add, Resource::Mana, Scope::You));
    }

    // "you may pay {..}" inside a result still spends mana.
    if cl.contains("you may pay {") {
        tags.insert(ev(EventKind::Lose, Resource::Mana, Scope::You));
    }

    // Return to the battlefield reads as an enters-style result.
    if cl.contains("return") && cl.contains("to the battlefield") {
        let scope = if cl.contains("under your control")
            || cl.contains("your graveyard")
            || cl.contains("you control")
        {
            Scope::YourPermanent
        } else {
            Scope::AnyPermanent
        };
        tags.insert(ev(EventKind::Enters, Resource::Permanent, scope));
    }

    tags
}

/// Finds the amount in a `pay N life` phrase, defaulting to 1.
fn pay_life_amount(cl: &str) -> i32 {
    let words = words_of(cl);
    for (i, word) in words.iter().enumerate() {
        if word == "pay"
            && let Some(amount) = words.get(i + 1).and_then(|w| w.parse::<i32>().ok())
            && words.get(i + 2).map(String::as_str) == Some("life")
        {
            return amount;
        }
    }
    1
}

/// Derives concrete atoms from a cost sub-span.
pub fn parse_cost_atoms(cost_text: &str) -> Vec<Atom> {
    let mut atoms = Vec::new();
    let cl = cost_text.to_lowercase();

    // Tap/untap symbols are state changes, not mana.
    if cl.contains("{t}") {
        atoms.push(StateDelta::tap("SELF").into());
    }
    if cl.contains("{q}") {
        atoms.push(StateDelta::untap("SELF").with_cause(Cause::Cost).into());
    }

    // Mana payment, coarse symbol count excluding tap/untap.
    let symbols: Vec<String> = mana_symbols(cost_text)
        .into_iter()
        .filter(|s| !is_state_symbol(s))
        .collect();
    let mana_cost = mana_value_of(&symbols);
    if mana_cost > 0 {
        atoms.push(
            ResourceDelta::new("mana", -(mana_cost as i32))
                .with_target("YOU")
                .with_cause(Cause::Cost)
                .with_source(Source::Card)
                .into(),
        );
    }

    if cl.contains("sacrifice") {
        atoms.push(
            ZoneMove::new(Zone::Battlefield, Zone::Graveyard, ObjKind::Permanent)
                .with_controller("YOU")
                .with_cause(Cause::Sacrifice)
                .with_source(Source::Card)
                .into(),
        );
    }

    if cl.contains("discard") && cl.contains("card") {
        atoms.push(
            ZoneMove::new(Zone::Hand, Zone::Graveyard, ObjKind::Card)
                .with_controller("YOU")
                .with_cause(Cause::Cost)
                .with_source(Source::Card)
                .into(),
        );
    }

    if cl.contains("pay") && cl.contains("life") {
        atoms.push(
            ResourceDelta::new("life", -pay_life_amount(&cl))
                .with_target("YOU")
                .with_cause(Cause::Cost)
                .with_source(Source::Card)
                .into(),
        );
    }

    if cl.contains("remove") && cl.contains("counter") {
        let mut delta = ResourceDelta::new("counter", -1)
            .with_target("SELF")
            .with_cause(Cause::Cost)
            .with_source(Source::Card);
        if cl.contains("+1/+1") {
            delta = delta.with_subtype("+1/+1");
        }
        atoms.push(delta.into());
    }

    atoms
}

/// Derives concrete atoms from a result sub-span.
pub fn parse_result_atoms(result_text: &str, card_name: Option<&str>) -> Vec<Atom> {
    let mut atoms = Vec::new();
    let cl = result_text.to_lowercase();

    // Mana production, including "Add {G} or {U}" choices.
    if let Some((amount, subtype)) = mana_from_add_clause(result_text) {
        atoms.push(
            ResourceDelta::new("mana", amount)
                .with_target("YOU")
                .with_subtype(subtype)
                .with_cause(Cause::Effect)
                .with_source(Source::Card)
                .into(),
        );
    }

    for unit in extract_action_units(result_text, card_name) {
        let quantity = unit.quantity.unwrap_or(1);
        match unit.kind {
            Some(ActionKind::DrawCard) => {
                for _ in 0..quantity {
                    atoms.push(
                        ZoneMove::new(Zone::Library, Zone::Hand, ObjKind::Card)
                            .with_controller("YOU")
                            .with_cause(Cause::Effect)
                            .with_source(Source::Card)
                            .into(),
                    );
                }
            }
            Some(ActionKind::CreateToken) => {
                for _ in 0..quantity {
                    atoms.push(
                        ZoneMove::new(Zone::Command, Zone::Battlefield, ObjKind::Token)
                            .with_controller("YOU")
                            .with_cause(Cause::Effect)
                            .with_source(Source::Card)
                            .into(),
                    );
                }
            }
            Some(ActionKind::GainLife) => {
                atoms.push(
                    ResourceDelta::new("life", quantity as i32)
                        .with_target("YOU")
                        .with_cause(Cause::Effect)
                        .with_source(Source::Card)
                        .into(),
                );
            }
            Some(ActionKind::LoseLife) => {
                let target = if cl.contains("opponent") { "OPPONENT" } else { "YOU" };
                atoms.push(
                    ResourceDelta::new("life", -(quantity as i32))
                        .with_target(target)
                        .with_cause(Cause::Effect)
                        .with_source(Source::Card)
                        .into(),
                );
            }
            Some(ActionKind::DealDamage) => {
                let target = unit.target.clone().unwrap_or_else(|| "ANY".to_string());
                atoms.push(
                    ResourceDelta::new("damage", quantity as i32)
                        .with_target(target)
                        .with_cause(Cause::Effect)
                        .with_source(Source::Card)
                        .into(),
                );
            }
            Some(ActionKind::AddCounter) => {
                let mut delta = ResourceDelta::new("counter", quantity as i32)
                    .with_target("SELF")
                    .with_cause(Cause::Effect)
                    .with_source(Source::Card);
                if cl.contains("+1/+1") {
                    delta = delta.with_subtype("+1/+1");
                }
                atoms.push(delta.into());
            }
            Some(ActionKind::RemoveCounter) => {
                let mut delta = ResourceDelta::new("counter", -(quantity as i32))
                    .with_target("SELF")
                    .with_cause(Cause::Effect)
                    .with_source(Source::Card);
                if cl.contains("+1/+1") {
                    delta = delta.with_subtype("+1/+1");
                }
                atoms.push(delta.into());
            }
            Some(ActionKind::AddMana) => {
                atoms.push(
                    ResourceDelta::new("mana", quantity as i32)
                        .with_target("YOU")
                        .with_cause(Cause::Effect)
                        .with_source(Source::Card)
                        .into(),
                );
            }
            _ => {}
        }
    }

    // Tap/untap as effects. Word check: "untap" must not satisfy "tap".
    if contains_word(&cl, "untap") {
        atoms.push(StateDelta::untap("TARGET").into());
    }
    if contains_word(&cl, "tap") {
        atoms.push(StateDelta::tap("TARGET").with_cause(Cause::Effect).into());
    }

    atoms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_tag(tags: &FxHashSet<EventTag>, kind: EventKind, resource: Resource, scope: Scope) -> bool {
        tags.contains(&EventTag::new(kind, resource, scope))
    }

    #[test]
    fn test_subject_verb_object_inflections() {
        assert!(subject_verb_object("you gain 3 life", "you", "gain", "life"));
        assert!(subject_verb_object(
            "target opponent loses 2 life",
            "target opponent",
            "lose",
            "life"
        ));
        assert!(!subject_verb_object("you gain 3 life", "opponent", "gain", "life"));
        // The object must follow the verb within one sentence.
        assert!(!subject_verb_object("you draw. a card is exiled", "you", "draw", "card"));
    }

    #[test]
    fn test_trigger_tags_dies() {
        let tags = parse_trigger_tags("Whenever a creature you control dies", None);
        assert!(has_tag(&tags, EventKind::Dies, Resource::Permanent, Scope::YourPermanent));
    }

    #[test]
    fn test_trigger_tags_dies_fallback_any() {
        let tags = parse_trigger_tags("Whenever a creature dies", None);
        assert!(has_tag(&tags, EventKind::Dies, Resource::Permanent, Scope::AnyPermanent));
        // The specific your-permanent tag must not appear.
        assert!(!has_tag(&tags, EventKind::Dies, Resource::Permanent, Scope::YourPermanent));
    }

    #[test]
    fn test_trigger_tags_upkeep() {
        let tags = parse_trigger_tags("At the beginning of your upkeep", None);
        let expected = EventTag::new(EventKind::Step, Resource::Permanent, Scope::You)
            .at_step(Step::Upkeep);
        assert!(tags.contains(&expected));
    }

    #[test]
    fn test_trigger_tags_cast() {
        let tags = parse_trigger_tags("Whenever you cast a noncreature spell", None);
        assert!(has_tag(&tags, EventKind::Cast, Resource::Card, Scope::You));
    }

    #[test]
    fn test_trigger_tags_enters() {
        let tags = parse_trigger_tags(
            "Whenever a creature enters the battlefield under your control",
            None,
        );
        assert!(has_tag(&tags, EventKind::Enters, Resource::Permanent, Scope::YourPermanent));

        let tags = parse_trigger_tags("Whenever a creature enters the battlefield", None);
        assert!(has_tag(&tags, EventKind::Enters, Resource::Permanent, Scope::AnyPermanent));
    }

    #[test]
    fn test_trigger_tags_lifegain() {
        let tags = parse_trigger_tags("Whenever you gain life", None);
        assert!(has_tag(&tags, EventKind::Gain, Resource::Life, Scope::You));
    }

    #[test]
    fn test_cost_tags() {
        let tags = parse_cost_tags("{2}{W}, {T}, Sacrifice a creature");
        assert!(has_tag(&tags, EventKind::Lose, Resource::Mana, Scope::You));
        assert!(has_tag(&tags, EventKind::Sacrifice, Resource::Permanent, Scope::YourPermanent));

        // Tap alone is not a mana payment.
        let tags = parse_cost_tags("{T}");
        assert!(!has_tag(&tags, EventKind::Lose, Resource::Mana, Scope::You));
    }

    #[test]
    fn test_result_tags_draw_and_scry() {
        let tags = parse_result_tags("draw a card.", None);
        assert!(has_tag(&tags, EventKind::Draw, Resource::Card, Scope::You));

        let tags = parse_result_tags("scry 2.", None);
        assert!(has_tag(&tags, EventKind::Draw, Resource::Card, Scope::You));
    }

    #[test]
    fn test_result_tags_inflected_damage_fallback() {
        let tags = parse_result_tags("This creature deals 3 damage to any target.", None);
        assert!(has_tag(&tags, EventKind::Deal, Resource::Damage, Scope::AnyPlayer));
    }

    #[test]
    fn test_result_tags_reanimation_scope() {
        let tags = parse_result_tags(
            "Return target creature card from your graveyard to the battlefield.",
            None,
        );
        assert!(has_tag(&tags, EventKind::Enters, Resource::Permanent, Scope::YourPermanent));

        let tags = parse_result_tags(
            "Return target creature card to the battlefield.",
            None,
        );
        assert!(has_tag(&tags, EventKind::Enters, Resource::Permanent, Scope::AnyPermanent));
    }

    #[test]
    fn test_cost_atoms_sacrifice_and_mana() {
        let atoms = parse_cost_atoms("{1}{B}, Sacrifice a creature");
        let mut mana_seen = false;
        let mut sacrifice_seen = false;
        for atom in &atoms {
            match atom {
                Atom::ResourceDelta(delta) if delta.resource == "mana" => {
                    assert_eq!(delta.delta, -2);
                    mana_seen = true;
                }
                Atom::ZoneMove(zone_move) => {
                    assert_eq!(zone_move.from_zone, Zone::Battlefield);
                    assert_eq!(zone_move.to_zone, Zone::Graveyard);
                    assert_eq!(zone_move.cause, Cause::Sacrifice);
                    sacrifice_seen = true;
                }
                _ => {}
            }
        }
        assert!(mana_seen);
        assert!(sacrifice_seen);
    }

    #[test]
    fn test_cost_atoms_tap_is_state_not_mana() {
        let atoms = parse_cost_atoms("{T}");
        assert_eq!(atoms.len(), 1);
        match &atoms[0] {
            Atom::StateDelta(delta) => {
                assert!(delta.set_mask.contains_all(crate::vocab::StatusFlags::TAPPED));
                assert_eq!(delta.cause, Cause::Cost);
            }
            other => panic!("expected a state delta, got {other:?}"),
        }
    }

    #[test]
    fn test_cost_atoms_pay_life() {
        let atoms = parse_cost_atoms("Pay 2 life");
        assert!(atoms.iter().any(|atom| matches!(
            atom,
            Atom::ResourceDelta(delta) if delta.resource == "life" && delta.delta == -2
        )));
    }

    #[test]
    fn test_result_atoms_draw_emits_per_card_moves() {
        let atoms = parse_result_atoms("Draw two cards.", None);
        let draws = atoms
            .iter()
            .filter(|atom| matches!(
                atom,
                Atom::ZoneMove(m) if m.from_zone == Zone::Library && m.to_zone == Zone::Hand
            ))
            .count();
        assert_eq!(draws, 2);
    }

    #[test]
    fn test_result_atoms_add_choice_takes_max() {
        let atoms = parse_result_atoms("Add {G} or {U}.", None);
        let mana: Vec<_> = atoms
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
    fn test_result_atoms_untap_does_not_double_as_tap() {
        let atoms = parse_result_atoms("Untap target land.", None);
        let taps = atoms
            .iter()
            .filter(|atom| matches!(
                atom,
                Atom::StateDelta(d) if d.set_mask.contains_all(crate::vocab::StatusFlags::TAPPED)
            ))
            .count();
        let untaps = atoms
            .iter()
            .filter(|atom| matches!(
                atom,
                Atom::StateDelta(d) if d.clear_mask.contains_all(crate::vocab::StatusFlags::TAPPED)
            ))
            .count();
        assert_eq!(untaps, 1);
        assert_eq!(taps, 0);
    }

    #[test]
    fn test_actor_and_target_tags() {
        let actors = infer_actor_tags("whenever a creature you control dies, draw a card.");
        assert!(actors.contains("YOU"));

        let targets = infer_target_tags("destroy another target creature you control.");
        assert!(targets.contains("ANOTHER_CREATURE_YOU_CONTROL"));
        assert!(!targets.contains("CREATURE_YOU_CONTROL"));

        let targets = infer_target_tags("deal 3 damage to any target.");
        assert!(targets.contains("ANY_TARGET"));
    }
}
