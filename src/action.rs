//! Micro-grammar extraction: clause → verb/quantity/object/target units.
//!
//! This is deliberately dumb-but-regular: a single left-to-right scan with
//! local lookahead, no backtracking, and no grammar beyond the fixed
//! lexicons below. A clause can yield several units ("draw a card. discard
//! a card.").

/// Canonical action labels resolved from `(verb, object)` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    DrawCard,
    CreateToken,
    DealDamage,
    GainLife,
    LoseLife,
    AddMana,
    AddCounter,
    RemoveCounter,
    SacrificeCreature,
    SacrificePermanent,
    DestroyCreature,
    DestroyPermanent,
    ExileCreature,
    ExilePermanent,
    ReturnCreature,
    ReturnCard,
    MillCard,
    SearchLibrary,
    CastSpell,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::DrawCard => "DRAW_CARD",
            ActionKind::CreateToken => "CREATE_TOKEN",
            ActionKind::DealDamage => "DEAL_DAMAGE",
            ActionKind::GainLife => "GAIN_LIFE",
            ActionKind::LoseLife => "LOSE_LIFE",
            ActionKind::AddMana => "ADD_MANA",
            ActionKind::AddCounter => "ADD_COUNTER",
            ActionKind::RemoveCounter => "REMOVE_COUNTER",
            ActionKind::SacrificeCreature => "SACRIFICE_CREATURE",
            ActionKind::SacrificePermanent => "SACRIFICE_PERMANENT",
            ActionKind::DestroyCreature => "DESTROY_CREATURE",
            ActionKind::DestroyPermanent => "DESTROY_PERMANENT",
            ActionKind::ExileCreature => "EXILE_CREATURE",
            ActionKind::ExilePermanent => "EXILE_PERMANENT",
            ActionKind::ReturnCreature => "RETURN_CREATURE",
            ActionKind::ReturnCard => "RETURN_CARD",
            ActionKind::MillCard => "MILL_CARD",
            ActionKind::SearchLibrary => "SEARCH_LIBRARY",
            ActionKind::CastSpell => "CAST_SPELL",
        }
    }
}

/// Minimal grammatical unit extracted from one oracle clause.
///
/// Example:
///
/// `'Remove a +1/+1 counter from this creature: It deals 1 damage to any
/// target.'` yields a unit with verb `deal`, quantity `1`, object
/// `damage`, target `any target`, kind [`ActionKind::DealDamage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionUnit {
    pub verb: String,
    pub quantity: Option<u32>,
    pub obj: Option<String>,
    pub target: Option<String>,
    pub kind: Option<ActionKind>,
    pub text_span: String,
}

const VERB_LEXICON: &[&str] = &[
    "draw",
    "create",
    "gain",
    "lose",
    "deal",
    "destroy",
    "exile",
    "sacrifice",
    "return",
    "untap",
    "tap",
    "search",
    "reveal",
    "put",
    "mill",
    "copy",
    "add",
    "fight",
    "cast",
    "play",
    "scry",
    "proliferate",
    "remove",
    "counter",
];

const QUANTITY_WORDS: &[&str] = &["a", "an", "one", "two", "three", "four", "five", "six", "x"];

const OBJECT_WORDS: &[&str] = &[
    "damage",
    "card",
    "cards",
    "token",
    "tokens",
    "life",
    "counter",
    "counters",
    "land",
    "lands",
    "creature",
    "creatures",
    "permanent",
    "permanents",
    "spell",
    "spells",
    "mana",
    "library",
];

const TARGET_MARKERS: &[&str] = &["target", "any", "each", "that", "those", "it", "this"];

/// Literal target phrases checked against the 4-token window at a marker.
const TARGET_PHRASES: &[&str] = &[
    "any target",
    "target creature",
    "target opponent",
    "target player",
    "each opponent",
    "each player",
];

fn word_quantity(word: &str) -> Option<u32> {
    match word {
        "one" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        "six" => Some(6),
        _ => None,
    }
}

/// Resolves a `(verb, object)` pair to its canonical label.
fn action_kind(verb: &str, obj: &str) -> Option<ActionKind> {
    match (verb, obj) {
        ("draw", "card") | ("draw", "cards") => Some(ActionKind::DrawCard),
        ("create", "token") | ("create", "tokens") => Some(ActionKind::CreateToken),
        ("deal", "damage") => Some(ActionKind::DealDamage),
        ("gain", "life") => Some(ActionKind::GainLife),
        ("lose", "life") => Some(ActionKind::LoseLife),
        ("add", "mana") => Some(ActionKind::AddMana),
        ("put", "counter") | ("put", "counters") => Some(ActionKind::AddCounter),
        ("remove", "counter") | ("remove", "counters") => Some(ActionKind::RemoveCounter),
        ("sacrifice", "creature") => Some(ActionKind::SacrificeCreature),
        ("sacrifice", "permanent") => Some(ActionKind::SacrificePermanent),
        ("destroy", "creature") => Some(ActionKind::DestroyCreature),
        ("destroy", "permanent") => Some(ActionKind::DestroyPermanent),
        ("exile", "creature") => Some(ActionKind::ExileCreature),
        ("exile", "permanent") => Some(ActionKind::ExilePermanent),
        ("return", "creature") => Some(ActionKind::ReturnCreature),
        ("return", "card") => Some(ActionKind::ReturnCard),
        ("mill", "card") | ("mill", "cards") => Some(ActionKind::MillCard),
        ("search", "library") => Some(ActionKind::SearchLibrary),
        ("cast", "spell") => Some(ActionKind::CastSpell),
        _ => None,
    }
}

/// Whitespace/punctuation tokenizer suited to oracle text: commas, colons,
/// and periods become their own tokens.
pub fn simple_tokens(clause: &str) -> Vec<String> {
    clause
        .replace(',', " , ")
        .replace(':', " : ")
        .replace('.', " . ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Extracts every [`ActionUnit`] from a single clause.
///
/// Scan left to right; at each verb-lexicon hit, look one token ahead for
/// a quantity (digit, number word, indefinite article; `x` stays unknown),
/// up to five tokens for an object noun (with verb-specific defaults),
/// then forward for a target marker whose 4-token window names a known
/// target phrase. A `"from <card name>"` or `"from this creature"`-style
/// mention overrides the target to `self`. Candidates with neither object
/// nor resolvable kind are dropped as noise.
pub fn extract_action_units(clause: &str, card_name: Option<&str>) -> Vec<ActionUnit> {
    let tokens = simple_tokens(clause);
    let n = tokens.len();
    let lower_clause = clause.to_lowercase();
    let name_lower = card_name.map(str::to_lowercase).unwrap_or_default();

    let mut units = Vec::new();
    let mut i = 0usize;

    while i < n {
        let verb = tokens[i].to_lowercase();
        if !VERB_LEXICON.contains(&verb.as_str()) {
            i += 1;
            continue;
        }

        let mut j = i + 1;

        // 1) Quantity: digits, number words, articles; 'x' consumed as unknown.
        let mut quantity: Option<u32> = None;
        if j < n {
            let qtok = tokens[j].to_lowercase();
            if let Ok(value) = qtok.parse::<u32>() {
                quantity = Some(value);
                j += 1;
            } else if QUANTITY_WORDS.contains(&qtok.as_str()) {
                if qtok != "x" {
                    quantity = Some(word_quantity(&qtok).unwrap_or(1));
                }
                j += 1;
            }
        }

        // 2) Object noun within the next five tokens.
        let mut obj: Option<String> = None;
        let mut k = j;
        while k < n.min(j + 5) && obj.is_none() {
            let otok = tokens[k].to_lowercase();
            if OBJECT_WORDS.contains(&otok.as_str()) {
                obj = Some(otok);
            }
            k += 1;
        }

        // Verb-specific defaults when strongly implied but unnamed.
        if obj.is_none() {
            if verb == "deal" {
                obj = Some("damage".to_string());
            } else if (verb == "gain" || verb == "lose") && lower_clause.contains("life") {
                obj = Some("life".to_string());
            } else if verb == "draw" {
                obj = Some("card".to_string());
            }
        }

        // 3) Target: self-reference mentions win over marker scanning.
        let mut target: Option<String> = None;
        if !name_lower.is_empty() && lower_clause.contains(&format!("from {name_lower}")) {
            target = Some("self".to_string());
        } else if lower_clause.contains("from this creature")
            || lower_clause.contains("from it")
            || lower_clause.contains("this creature")
        {
            target = Some("self".to_string());
        }

        if target.is_none() {
            let mut t_idx = k;
            while t_idx < n {
                let marker = tokens[t_idx].to_lowercase();
                if TARGET_MARKERS.contains(&marker.as_str()) {
                    let window = tokens[t_idx..n.min(t_idx + 4)]
                        .join(" ")
                        .to_lowercase();
                    target = TARGET_PHRASES
                        .iter()
                        .find(|phrase| window.starts_with(*phrase))
                        .map(|phrase| phrase.to_string());
                    break;
                }
                t_idx += 1;
            }
        }

        // 4) Canonical kind, with singular folding as fallback.
        let kind = obj.as_deref().and_then(|o| {
            action_kind(&verb, o).or_else(|| {
                let singular = o.strip_suffix('s').unwrap_or(o);
                action_kind(&verb, singular)
            })
        });

        if obj.is_none() && kind.is_none() {
            i += 1;
            continue;
        }

        units.push(ActionUnit {
            verb,
            quantity,
            obj,
            target,
            kind,
            text_span: clause.to_string(),
        });

        i += 1;
    }

    units
}
