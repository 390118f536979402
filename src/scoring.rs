//! Engine and synergy scoring over assembled cards.
//!
//! Scores are relative ranking signals within one corpus, not
//! probabilities; nothing is normalized or clamped. The synergy function
//! respects effect boundaries: costs come only from an effect's cost
//! atoms/tags, never from a card-wide union, so a card that merely loses
//! mana in some result is not mistaken for a mana sink.

use std::collections::BTreeSet;

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use tracing::info;

use crate::atom::Atom;
use crate::card::Card;
use crate::effect::Effect;
use crate::tags::EventTag;
use crate::vocab::{EventKind, ObjKind, Resource, Scope, Zone};

/// Per-card heuristic: high when the card repeatedly produces cards,
/// tokens, or life without heavy costs.
pub fn engine_score(card: &Card) -> f64 {
    let mut score = 0.0;

    for effect in &card.effects {
        // Frequent trigger patterns.
        for tag in &effect.trigger_tags {
            if tag.kind == EventKind::Draw && tag.scope == Scope::You {
                score += 1.5;
            }
            if tag.kind == EventKind::Gain && tag.resource == Resource::Life {
                score += 1.5;
            }
            if tag.kind == EventKind::Enters
                && matches!(tag.scope, Scope::YourPermanent | Scope::AnyPermanent)
            {
                score += 1.0;
            }
            if tag.kind == EventKind::Dies {
                score += 1.0;
            }
        }

        // Value results.
        for tag in &effect.result_tags {
            if tag.kind == EventKind::Draw && tag.resource == Resource::Card {
                score += 3.0;
            }
            if tag.kind == EventKind::Create && tag.resource == Resource::Token {
                score += 2.5;
            }
            if tag.kind == EventKind::Gain && tag.resource == Resource::Life {
                score += 1.0;
            }
        }

        // Costs that hurt engines.
        if effect
            .cost_tags
            .iter()
            .any(|t| t.kind == EventKind::Sacrifice && t.resource == Resource::Permanent)
        {
            score -= 1.0;
        }
        if effect
            .cost_tags
            .iter()
            .any(|t| t.kind == EventKind::Lose && t.resource == Resource::Life)
        {
            score -= 0.5;
        }
    }

    score
}

fn effect_produces_mana(effect: &Effect) -> bool {
    effect.result_atoms.iter().any(|atom| {
        matches!(atom, Atom::ResourceDelta(delta) if delta.resource == "mana" && delta.delta > 0)
    })
}

fn effect_consumes_mana(effect: &Effect) -> bool {
    effect.cost_atoms.iter().any(|atom| {
        matches!(atom, Atom::ResourceDelta(delta) if delta.resource == "mana" && delta.delta < 0)
    })
}

fn effect_produces_bodies(effect: &Effect) -> bool {
    effect.result_atoms.iter().any(|atom| {
        matches!(
            atom,
            Atom::ZoneMove(m)
                if m.to_zone == Zone::Battlefield
                    && matches!(m.obj, ObjKind::Token | ObjKind::Permanent)
                    && m.controller.as_deref() == Some("YOU")
        )
    })
}

fn effect_sacs_creatures(effect: &Effect) -> bool {
    effect.cost_atoms.iter().any(|atom| {
        matches!(
            atom,
            Atom::ZoneMove(m)
                if m.from_zone == Zone::Battlefield
                    && m.to_zone == Zone::Graveyard
                    && m.obj == ObjKind::Permanent
                    && m.controller.as_deref() == Some("YOU")
                    && m.cause == crate::vocab::Cause::Sacrifice
        )
    })
}

const GOOD_OUTPUTS: &[(EventKind, Resource)] = &[
    (EventKind::Draw, Resource::Card),
    (EventKind::Create, Resource::Token),
    (EventKind::Add, Resource::Counter),
    (EventKind::Add, Resource::Mana),
    (EventKind::Gain, Resource::Life),
];

const SCARCE_COSTS: &[(EventKind, Resource)] = &[
    (EventKind::Sacrifice, Resource::Permanent),
    (EventKind::Lose, Resource::Life),
];

fn good_output_pairs(result_tags: &FxHashSet<EventTag>) -> BTreeSet<(EventKind, Resource)> {
    result_tags
        .iter()
        .filter(|t| matches!(t.scope, Scope::You | Scope::YourPermanent))
        .map(|t| (t.kind, t.resource))
        .filter(|pair| GOOD_OUTPUTS.contains(pair))
        .collect()
}

fn scarce_cost_pairs(cost_tags: &FxHashSet<EventTag>) -> BTreeSet<(EventKind, Resource)> {
    cost_tags
        .iter()
        .map(|t| (t.kind, t.resource))
        .filter(|pair| SCARCE_COSTS.contains(pair))
        .collect()
}

/// Pairwise synergy between two cards.
///
/// Layered scoring: card-level tag feeds, then an effect-by-effect scan
/// for trigger feeds and resource feeding (mana engines, bodies into sac
/// outlets), then shared desirable outputs, minus shared scarce costs.
pub fn card_synergy(a: &Card, b: &Card) -> f64 {
    let a_triggers = a.all_trigger_tags();
    let a_results = a.all_result_tags();
    let a_costs = a.all_cost_tags();

    let b_triggers = b.all_trigger_tags();
    let b_results = b.all_result_tags();
    let b_costs = b.all_cost_tags();

    let mut score = 0.0;

    // 1) Direct event feeds at card level, both directions.
    let feeds_ab = a_results.intersection(&b_triggers).count();
    let feeds_ba = b_results.intersection(&a_triggers).count();
    score += 3.0 * (feeds_ab + feeds_ba) as f64;

    // 2) Effect-level scan. Individual abilities feed each other; the
    //    whole card is never treated as one abstract producer/consumer.
    for ea in &a.effects {
        for eb in &b.effects {
            if ea.result_tags.intersection(&eb.trigger_tags).next().is_some() {
                score += 3.0;
            }
            if eb.result_tags.intersection(&ea.trigger_tags).next().is_some() {
                score += 3.0;
            }

            if effect_produces_mana(ea) && effect_consumes_mana(eb) {
                score += 2.0;
            }
            if effect_produces_mana(eb) && effect_consumes_mana(ea) {
                score += 2.0;
            }

            if effect_produces_bodies(ea) && effect_sacs_creatures(eb) {
                score += 2.0;
            }
            if effect_produces_bodies(eb) && effect_sacs_creatures(ea) {
                score += 2.0;
            }
        }
    }

    // 3) Shared desirable outputs for the controller stack nicely.
    let shared_good = good_output_pairs(&a_results)
        .intersection(&good_output_pairs(&b_results))
        .count();
    score += 1.5 * shared_good as f64;

    // 4) Shared scarce costs compete with each other.
    let shared_bad = scarce_cost_pairs(&a_costs)
        .intersection(&scarce_cost_pairs(&b_costs))
        .count();
    score -= 1.0 * shared_bad as f64;

    score
}

/// Which way two cards feed each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedDirection {
    /// Both directions feed; a potential two-card loop.
    BothDirections,
    /// One direction feeds; could be part of a larger loop.
    OneDirection,
    /// No direct event-tag feed detected.
    NoFeed,
}

/// Directional result-to-trigger feeds between two cards, in tag
/// short-form for reporting.
#[derive(Debug, Clone)]
pub struct FeedReport {
    pub a_to_b: BTreeSet<String>,
    pub b_to_a: BTreeSet<String>,
}

impl FeedReport {
    pub fn direction(&self) -> FeedDirection {
        match (self.a_to_b.is_empty(), self.b_to_a.is_empty()) {
            (false, false) => FeedDirection::BothDirections,
            (true, true) => FeedDirection::NoFeed,
            _ => FeedDirection::OneDirection,
        }
    }
}

/// Computes which of `a`'s results feed `b`'s triggers and vice versa.
pub fn feed_report(a: &Card, b: &Card) -> FeedReport {
    let a_to_b = a
        .all_result_tags()
        .intersection(&b.all_trigger_tags())
        .map(EventTag::short)
        .collect();
    let b_to_a = b
        .all_result_tags()
        .intersection(&a.all_trigger_tags())
        .map(EventTag::short)
        .collect();
    FeedReport { a_to_b, b_to_a }
}

/// One row of the corpus-wide engine table.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize))]
pub struct EngineRow {
    pub name: String,
    pub colors: String,
    pub mana_value: f64,
    pub engine_score: f64,
    pub triggers: Vec<String>,
    pub results: Vec<String>,
    pub costs: Vec<String>,
}

/// Builds the engine table for every card with at least one parsed
/// effect, sorted by engine score descending. Rows are scored in
/// parallel; scoring is pure, so the fan-out needs no coordination.
pub fn build_engine_table(cards: &[Card]) -> Vec<EngineRow> {
    let mut rows: Vec<EngineRow> = cards
        .par_iter()
        .filter(|card| !card.effects.is_empty())
        .map(|card| {
            let mut triggers: Vec<String> =
                card.all_trigger_tags().iter().map(EventTag::short).collect();
            let mut results: Vec<String> =
                card.all_result_tags().iter().map(EventTag::short).collect();
            let mut costs: Vec<String> =
                card.all_cost_tags().iter().map(EventTag::short).collect();
            triggers.sort();
            results.sort();
            costs.sort();

            EngineRow {
                name: card.name.clone(),
                colors: card.colors.letters(),
                mana_value: card.mana_value,
                engine_score: engine_score(card),
                triggers,
                results,
                costs,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.engine_score
            .partial_cmp(&a.engine_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });

    info!(cards = cards.len(), rows = rows.len(), "built engine table");
    rows
}

/// Pairwise synergy over a corpus slice: `(i, j, score)` for every
/// unordered pair, computed in parallel.
pub fn synergy_matrix(cards: &[Card]) -> Vec<(usize, usize, f64)> {
    let pairs: Vec<(usize, usize)> = (0..cards.len())
        .flat_map(|i| ((i + 1)..cards.len()).map(move |j| (i, j)))
        .collect();

    pairs
        .into_par_iter()
        .map(|(i, j)| (i, j, card_synergy(&cards[i], &cards[j])))
        .collect()
}
