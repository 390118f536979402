//! Card assembly and engine summaries.
//!
//! A [`Card`] is built once from a corpus row and never mutated; it owns
//! its effects, which own their tags and atoms. Scoring reads cards, it
//! never re-parses text.

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;

use crate::color::ColorSet;
use crate::corpus::CardRow;
use crate::effect::{Effect, parse_effects_from_text};
use crate::tags::EventTag;
use crate::themes::detect_themes;

/// When a card can be cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastTiming {
    InstantSpeed,
    SorcerySpeed,
    Special,
}

impl CastTiming {
    pub fn as_str(self) -> &'static str {
        match self {
            CastTiming::InstantSpeed => "instant_speed",
            CastTiming::SorcerySpeed => "sorcery_speed",
            CastTiming::Special => "special",
        }
    }
}

/// A fully parsed card.
#[derive(Debug, Clone)]
pub struct Card {
    pub name: String,
    pub mana_value: f64,
    pub mana_cost: String,
    pub colors: ColorSet,

    pub types: Vec<String>,
    pub is_permanent: bool,
    pub cast_timing: CastTiming,

    pub oracle_text: String,
    pub keywords: Vec<String>,

    pub power: Option<i32>,
    pub toughness: Option<i32>,
    pub loyalty: Option<i32>,

    pub effects: Vec<Effect>,
}

impl Card {
    /// Union of trigger tags across all effects.
    pub fn all_trigger_tags(&self) -> FxHashSet<EventTag> {
        self.effects
            .iter()
            .flat_map(|e| e.trigger_tags.iter().copied())
            .collect()
    }

    /// Union of result tags across all effects.
    pub fn all_result_tags(&self) -> FxHashSet<EventTag> {
        self.effects
            .iter()
            .flat_map(|e| e.result_tags.iter().copied())
            .collect()
    }

    /// Union of cost tags across all effects.
    pub fn all_cost_tags(&self) -> FxHashSet<EventTag> {
        self.effects
            .iter()
            .flat_map(|e| e.cost_tags.iter().copied())
            .collect()
    }

    pub fn all_actor_tags(&self) -> BTreeSet<String> {
        self.effects
            .iter()
            .flat_map(|e| e.actor_tags.iter().cloned())
            .collect()
    }

    pub fn all_target_tags(&self) -> BTreeSet<String> {
        self.effects
            .iter()
            .flat_map(|e| e.target_tags.iter().cloned())
            .collect()
    }

    /// Themes the card matches, from oracle text plus declared keywords.
    pub fn infer_theme_tags(&self) -> BTreeSet<&'static str> {
        let type_line = self.types.join(" ");
        detect_themes(&self.oracle_text, &type_line, &self.keywords)
    }
}

/// Flattened per-card engine view for reporting and export, tag
/// short-forms only so consumers need no internal types.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize))]
pub struct EngineSummary {
    pub name: String,
    pub triggers: BTreeSet<String>,
    pub results: BTreeSet<String>,
    pub costs: BTreeSet<String>,
    pub actors: BTreeSet<String>,
    pub targets: BTreeSet<String>,
}

/// Flattens a card's engine-relevant structure into short-form strings.
pub fn summarize_card_engine(card: &Card) -> EngineSummary {
    EngineSummary {
        name: card.name.clone(),
        triggers: card.all_trigger_tags().iter().map(EventTag::short).collect(),
        results: card.all_result_tags().iter().map(EventTag::short).collect(),
        costs: card.all_cost_tags().iter().map(EventTag::short).collect(),
        actors: card.all_actor_tags(),
        targets: card.all_target_tags(),
    }
}

fn parse_types(type_line: &str) -> Vec<String> {
    type_line
        .replace('—', "-")
        .split_whitespace()
        .filter(|word| word.chars().next().is_some_and(char::is_uppercase))
        .map(str::to_string)
        .collect()
}

/// Builds a [`Card`] from one corpus row, parsing its effects.
///
/// Missing or malformed fields degrade to safe defaults; absent oracle
/// text yields a card with zero effects, never an error.
pub fn card_from_row(row: &CardRow) -> Card {
    let type_line = row.type_line();
    let oracle_text = row.oracle_text();

    let cast_timing = if type_line.contains("Instant") {
        CastTiming::InstantSpeed
    } else if type_line.contains("Sorcery") {
        CastTiming::SorcerySpeed
    } else {
        CastTiming::Special
    };

    let is_permanent = !(type_line.contains("Instant") || type_line.contains("Sorcery"));

    let effects = parse_effects_from_text(oracle_text, Some(&row.name));

    Card {
        name: row.name.clone(),
        mana_value: row.mana_value(),
        mana_cost: row.mana_cost().to_string(),
        colors: ColorSet::from_letters(row.color_identity().iter().map(String::as_str)),
        types: parse_types(type_line),
        is_permanent,
        cast_timing,
        oracle_text: oracle_text.to_string(),
        keywords: row.keywords(),
        power: row.power(),
        toughness: row.toughness(),
        loyalty: row.loyalty(),
        effects,
    }
}
