//! Oracle-text analysis: parse card rules text into normalized effects,
//! event tags, and state-transition atoms, then score engines and
//! pairwise synergies over the parsed corpus.
//!
//! The whole core is a pure, stateless transformation — `row → Card` and
//! `(Card, Card) → f64` — with no I/O and no shared mutable state, so
//! corpus-wide work parallelizes freely at the row and pair level.

pub mod action;
pub mod atom;
pub mod card;
pub mod clause;
pub mod color;
pub mod corpus;
pub mod derive;
pub mod effect;
pub mod keywords;
pub mod mana;
pub mod scoring;
pub mod tags;
pub mod themes;
pub mod vocab;

pub use action::{ActionKind, ActionUnit, extract_action_units};
pub use atom::{
    Atom, AtomPattern, ResourceDelta, ResourceDeltaPattern, StateDelta, StateDeltaPattern,
    StepChange, StepChangePattern, ZoneMove, ZoneMovePattern,
};
pub use card::{Card, CastTiming, EngineSummary, card_from_row, summarize_card_engine};
pub use clause::{
    EffectTier, TierRule, TIER_RULES, classify_tier, guess_effect_type, normalize_clause,
    split_abilities, split_cost_clause, split_trigger_clause,
};
pub use color::{Color, ColorSet};
pub use corpus::{CardRow, CorpusError};
pub use derive::{
    parse_cost_atoms, parse_cost_tags, parse_result_atoms, parse_result_tags, parse_trigger_tags,
};
pub use effect::{Effect, parse_effects_from_text};
pub use keywords::{KeywordHit, extract_keyword_hits};
pub use scoring::{
    EngineRow, FeedDirection, FeedReport, build_engine_table, card_synergy, engine_score,
    feed_report, synergy_matrix,
};
pub use tags::EventTag;
pub use themes::{detect_text_themes, detect_themes};
pub use vocab::{Cause, EventKind, ObjKind, Resource, Scope, Source, StatusFlags, Step, Zone};

#[cfg(feature = "serialization")]
pub use corpus::load_rows;
