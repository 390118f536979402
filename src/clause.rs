//! Clause segmentation and effect-tier classification.
//!
//! Oracle text arrives as newline-separated ability blocks. Activated and
//! triggered abilities must stay whole (their cost/trigger and result are
//! one unit separated by `:` or `,`), while static prose is naturally
//! sentence-granular, so splitting happens at two levels. Tier
//! classification is an ordered rule table: precedence is a data
//! structure, not implicit code order.

/// Effect tiers, coarsest classification of an ability clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectTier {
    Replacement,
    Triggered,
    Activated,
    Static,
}

impl EffectTier {
    pub fn as_str(self) -> &'static str {
        match self {
            EffectTier::Replacement => "replacement",
            EffectTier::Triggered => "triggered",
            EffectTier::Activated => "activated",
            EffectTier::Static => "static",
        }
    }
}

/// Trigger preambles, longest first so `whenever` is never read as `when`.
const TRIGGER_PREFIXES: &[&str] = &[
    "whenever ",
    "when ",
    "at the beginning of ",
    "at the start of ",
    "at ",
];

fn trigger_prefix_len(text: &str) -> Option<usize> {
    let lower = text.to_lowercase();
    TRIGGER_PREFIXES
        .iter()
        .find(|prefix| lower.starts_with(*prefix))
        .map(|prefix| prefix.len())
}

/// Returns true if the line opens with a trigger preamble.
pub fn has_trigger_prefix(text: &str) -> bool {
    trigger_prefix_len(text).is_some()
}

/// Splits a static/spell prose line on sentence boundaries (`". "`), the
/// way a regex split on `\.\s+` would: the separator period is dropped
/// from every sentence but the last.
fn split_sentences(line: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut start = 0usize;
    let bytes = line.as_bytes();
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i] == b'.' && i + 1 < bytes.len() && bytes[i + 1].is_ascii_whitespace() {
            parts.push(line[start..i].to_string());
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            start = i;
        } else {
            i += 1;
        }
    }
    if start < line.len() {
        parts.push(line[start..].to_string());
    }
    parts
}

/// Splits oracle text into ability-like chunks.
///
/// Newlines are the primary separators. A line is kept whole when it has
/// activated shape (contains a colon) or opens with a trigger preamble;
/// anything else is treated as static/spell prose and sentence-split.
/// Empty fragments are dropped.
pub fn split_abilities(oracle_text: &str) -> Vec<String> {
    let mut abilities = Vec::new();

    for line in oracle_text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.contains(':') || has_trigger_prefix(line) {
            abilities.push(line.to_string());
        } else {
            for sentence in split_sentences(line) {
                let sentence = sentence.trim();
                if !sentence.is_empty() {
                    abilities.push(sentence.to_string());
                }
            }
        }
    }

    abilities
}

/// Splits a triggered clause into trigger condition and result.
///
/// `'Whenever another creature you control dies, draw a card.'` becomes
/// `('Whenever another creature you control dies', 'draw a card.')`.
/// With no comma the entire clause is kept as the trigger and the result
/// is empty; downstream that yields zero result tags. Known heuristic
/// gap (the result may simply be unextracted), not a verified rule.
pub fn split_trigger_clause(text: &str) -> (Option<String>, String) {
    let Some(prefix_len) = trigger_prefix_len(text) else {
        return (None, text.to_string());
    };

    let prefix = text[..prefix_len].trim();
    let rest = text[prefix_len..].trim();

    match rest.split_once(',') {
        Some((condition, result)) => {
            let trigger = format!("{} {}", prefix, condition.trim());
            (Some(trigger), result.trim().to_string())
        }
        None => (Some(text.trim().to_string()), String::new()),
    }
}

/// Splits an activated clause into cost and result on the first colon.
///
/// `'{2}{W}, {T}, Sacrifice a creature: Draw two cards.'` becomes
/// `('{2}{W}, {T}, Sacrifice a creature', 'Draw two cards.')`. Clauses
/// without a colon have no cost.
pub fn split_cost_clause(text: &str) -> (Option<String>, String) {
    match text.split_once(':') {
        Some((cost, result)) => (Some(cost.trim().to_string()), result.trim().to_string()),
        None => (None, text.to_string()),
    }
}

fn is_replacement_like(cl: &str) -> bool {
    let has_instead_or_prevent = cl.contains(" instead") || cl.contains("prevent ");
    let has_conditional = cl.contains(" if ")
        || cl.starts_with("if ")
        || cl.contains(" whenever ")
        || cl.starts_with("whenever ")
        || cl.contains(" when ")
        || cl.starts_with("when ")
        || cl.contains(" would ")
        || cl.starts_with("as ");
    has_instead_or_prevent && has_conditional
}

fn is_triggered_like(cl: &str) -> bool {
    cl.starts_with("whenever ")
        || cl.starts_with("when ")
        || cl.starts_with("at the beginning")
        || cl.contains(" whenever ")
        || cl.contains(" at the beginning of ")
        || cl.contains("at end of combat")
        || cl.contains("at the end of combat")
}

/// Cost-marker phrases that make the left side of a colon look like a
/// real activation cost rather than prose.
const COST_MARKERS: &[&str] = &[
    "tap ",
    "untap ",
    "discard a card",
    "discard a creature card",
    "sacrifice a",
    "sacrifice another",
    "pay {n} life",
    "pay {cost}",
    "exile a",
    "exile this",
    "return",
    "remove a +1/+1 counter",
];

fn is_activated_like(cl: &str) -> bool {
    let Some((cost_part, _)) = cl.split_once(':') else {
        return false;
    };
    if cost_part.contains('{') {
        return true;
    }
    COST_MARKERS.iter().any(|marker| cost_part.contains(marker))
}

fn is_static_like(_cl: &str) -> bool {
    true
}

/// One row of the tier rule table.
pub struct TierRule {
    pub name: &'static str,
    pub tier: EffectTier,
    pub applies: fn(&str) -> bool,
}

/// The ordered tier rules, evaluated top to bottom; first hit wins.
///
/// Replacement must be checked before triggered: replacement effects
/// ("if X would happen, instead...") often also contain trigger words and
/// would otherwise be misclassified. Static is the catch-all.
pub const TIER_RULES: &[TierRule] = &[
    TierRule {
        name: "replacement",
        tier: EffectTier::Replacement,
        applies: is_replacement_like,
    },
    TierRule {
        name: "triggered",
        tier: EffectTier::Triggered,
        applies: is_triggered_like,
    },
    TierRule {
        name: "activated",
        tier: EffectTier::Activated,
        applies: is_activated_like,
    },
    TierRule {
        name: "static",
        tier: EffectTier::Static,
        applies: is_static_like,
    },
];

/// Classifies a clause's effect tier; a blank clause is `None`.
pub fn classify_tier(clause: &str) -> Option<EffectTier> {
    let cl = clause.trim().to_lowercase();
    if cl.is_empty() {
        return None;
    }
    TIER_RULES
        .iter()
        .find(|rule| (rule.applies)(&cl))
        .map(|rule| rule.tier)
}

/// The tighter classifier used during full effect parsing.
///
/// Same precedence order as [`TIER_RULES`] (replacement > triggered >
/// activated > static) with stricter conditions: replacement requires the
/// three-token `if…would…instead` shape, and activation requires a known
/// cost keyword or mana symbol left of the colon.
pub fn guess_effect_type(clause: &str) -> EffectTier {
    let cl = clause.to_lowercase();

    if cl.starts_with("if ") && cl.contains(" would ") && cl.contains(" instead") {
        return EffectTier::Replacement;
    }

    if cl.starts_with("whenever ") || cl.starts_with("when ") || cl.starts_with("at the beginning")
    {
        return EffectTier::Triggered;
    }

    if let Some((cost_part, _)) = cl.split_once(':')
        && (cost_part.contains('{')
            || cost_part.contains("sacrifice")
            || cost_part.contains("discard")
            || cost_part.contains("exile")
            || cost_part.contains("tap")
            || cost_part.contains("untap")
            || cost_part.contains("pay"))
    {
        return EffectTier::Activated;
    }

    EffectTier::Static
}

/// Splits raw text on sentence/line boundaries for pattern mining.
pub fn split_clauses(text: &str) -> Vec<String> {
    text.split(['.', '\n', ';'])
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalizes a clause so similar templates group together: lowercase,
/// mana symbols to `{COST}`, the tap symbol to `{TAP}`, integers to `{N}`,
/// whitespace compressed.
pub fn normalize_clause(clause: &str) -> String {
    let lower = clause.to_lowercase();
    let mut out = String::with_capacity(lower.len());

    let mut chars = lower.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '{' {
            out.push(ch);
            continue;
        }
        let mut body = String::new();
        let mut closed = false;
        for inner in chars.by_ref() {
            if inner == '}' {
                closed = true;
                break;
            }
            body.push(inner);
        }
        if !closed {
            out.push('{');
            out.push_str(&body);
            continue;
        }
        let is_cost_symbol = !body.is_empty()
            && body
                .chars()
                .all(|c| c.is_ascii_digit() || "wubrgc/".contains(c));
        if is_cost_symbol {
            out.push_str("{COST}");
        } else if body == "t" {
            out.push_str("{TAP}");
        } else {
            out.push('{');
            out.push_str(&body);
            out.push('}');
        }
    }

    // Fold remaining integer literals into {N}.
    let mut folded = String::with_capacity(out.len());
    let mut digits_pending = false;
    for ch in out.chars() {
        if ch.is_ascii_digit() {
            if !digits_pending {
                folded.push_str("{N}");
                digits_pending = true;
            }
        } else {
            digits_pending = false;
            folded.push(ch);
        }
    }

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_abilities_keeps_activated_lines_whole() {
        let text = "{T}: Add {G}.\nWhenever a creature dies, draw a card.";
        let abilities = split_abilities(text);
        assert_eq!(abilities.len(), 2);
        assert_eq!(abilities[0], "{T}: Add {G}.");
    }

    #[test]
    fn test_split_abilities_sentence_splits_static_prose() {
        let text = "Flying. This spell costs less to cast during your turn.";
        let abilities = split_abilities(text);
        assert_eq!(abilities.len(), 2);
        assert_eq!(abilities[0], "Flying");
        assert_eq!(
            abilities[1],
            "This spell costs less to cast during your turn."
        );
    }

    #[test]
    fn test_split_abilities_drops_empty_lines() {
        assert!(split_abilities("").is_empty());
        assert!(split_abilities("\n\n").is_empty());
    }

    #[test]
    fn test_split_trigger_clause() {
        let (trigger, result) =
            split_trigger_clause("Whenever another creature you control dies, draw a card.");
        assert_eq!(
            trigger.as_deref(),
            Some("Whenever another creature you control dies")
        );
        assert_eq!(result, "draw a card.");
    }

    #[test]
    fn test_split_trigger_clause_no_comma_keeps_whole_as_trigger() {
        let (trigger, result) = split_trigger_clause("When this creature dies");
        assert_eq!(trigger.as_deref(), Some("When this creature dies"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_split_trigger_clause_whenever_not_read_as_when() {
        let (trigger, _) = split_trigger_clause("Whenever you gain life, scry 1.");
        assert_eq!(trigger.as_deref(), Some("Whenever you gain life"));
    }

    #[test]
    fn test_split_cost_clause() {
        let (cost, result) = split_cost_clause("{2}{W}, {T}, Sacrifice a creature: Draw two cards.");
        assert_eq!(cost.as_deref(), Some("{2}{W}, {T}, Sacrifice a creature"));
        assert_eq!(result, "Draw two cards.");
    }

    #[test]
    fn test_classify_tier_precedence_replacement_over_triggered() {
        let tier = classify_tier("If a creature you control would die, instead exile it.");
        assert_eq!(tier, Some(EffectTier::Replacement));

        // Trigger words present, but the replacement rule wins.
        let tier = classify_tier("Whenever a creature would die, exile it instead.");
        assert_eq!(tier, Some(EffectTier::Replacement));
    }

    #[test]
    fn test_classify_tier_triggered() {
        let tier = classify_tier("Whenever a creature you control dies, draw a card.");
        assert_eq!(tier, Some(EffectTier::Triggered));
    }

    #[test]
    fn test_classify_tier_activated_needs_cost_shape() {
        assert_eq!(
            classify_tier("{T}: Add {G}."),
            Some(EffectTier::Activated)
        );
        assert_eq!(
            classify_tier("Sacrifice a creature: Draw two cards."),
            Some(EffectTier::Activated)
        );
        // A colon alone with prose on the left is not an activation.
        assert_eq!(
            classify_tier("Choose one: nothing happens."),
            Some(EffectTier::Static)
        );
    }

    #[test]
    fn test_classify_tier_static_default_and_blank_none() {
        assert_eq!(classify_tier("Flying"), Some(EffectTier::Static));
        assert_eq!(classify_tier("   "), None);
    }

    #[test]
    fn test_classifiers_agree_on_precedence() {
        // Both replacement-shaped and trigger-shaped; both classifiers
        // must pick replacement over triggered.
        let clause = "If a creature would die this turn, exile it instead.";
        assert_eq!(classify_tier(clause), Some(EffectTier::Replacement));
        assert_eq!(guess_effect_type(clause), EffectTier::Replacement);
    }

    #[test]
    fn test_guess_effect_type_activated() {
        assert_eq!(
            guess_effect_type("Sacrifice a creature: Draw two cards."),
            EffectTier::Activated
        );
        assert_eq!(
            guess_effect_type("{T}: Add {G}."),
            EffectTier::Activated
        );
    }

    #[test]
    fn test_normalize_clause() {
        assert_eq!(
            normalize_clause("{1}{W}{U/B}: Draw 2 cards"),
            "{COST}{COST}{COST}: draw {N} cards"
        );
        assert_eq!(normalize_clause("{T}: Add {G}"), "{TAP}: add {COST}");
        assert_eq!(normalize_clause("  Deal  3   damage "), "deal {N} damage");
    }

    #[test]
    fn test_split_clauses_for_mining() {
        let clauses = split_clauses("Flying. Vigilance; lifelink\nDraw a card.");
        assert_eq!(
            clauses,
            vec!["Flying", "Vigilance", "lifelink", "Draw a card"]
        );
    }
}
