//! Rules-keyword glossary and per-clause context extraction.
//!
//! The glossary is read-only configuration shared by value; hits are kept
//! for later analysis and reporting, not for tag derivation.

/// Rough category of a glossary term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Symbol,
    VariableCost,
    RulesTerm,
    Subtype,
    CardType,
    Supertype,
    SupertypeType,
    ZoneAction,
    KeywordAction,
    KeywordAbility,
}

/// One glossary entry: the literal term and its category.
pub struct GlossaryEntry {
    pub term: &'static str,
    pub category: KeywordCategory,
}

const fn entry(term: &'static str, category: KeywordCategory) -> GlossaryEntry {
    GlossaryEntry { term, category }
}

/// The keyword glossary, matched with word boundaries against clauses.
pub const KEYWORD_GLOSSARY: &[GlossaryEntry] = &[
    // Symbols / costs
    entry("tap", KeywordCategory::Symbol),
    entry("x", KeywordCategory::VariableCost),
    // Cost / cast structure
    entry("additional cost", KeywordCategory::RulesTerm),
    entry("cost", KeywordCategory::RulesTerm),
    entry("mana", KeywordCategory::RulesTerm),
    entry("mana ability", KeywordCategory::RulesTerm),
    entry("mana value", KeywordCategory::RulesTerm),
    entry("mulligan", KeywordCategory::RulesTerm),
    // Card / object identity
    entry("aura", KeywordCategory::Subtype),
    entry("equipment", KeywordCategory::Subtype),
    entry("planeswalker", KeywordCategory::CardType),
    entry("legendary", KeywordCategory::Supertype),
    entry("basic land", KeywordCategory::SupertypeType),
    entry("permanent", KeywordCategory::RulesTerm),
    entry("token", KeywordCategory::RulesTerm),
    entry("spell", KeywordCategory::RulesTerm),
    entry("source", KeywordCategory::RulesTerm),
    // Color / colorless
    entry("color", KeywordCategory::RulesTerm),
    entry("colorless", KeywordCategory::RulesTerm),
    // Zones & movement
    entry("enters the battlefield", KeywordCategory::RulesTerm),
    entry("leaves the battlefield", KeywordCategory::RulesTerm),
    entry("put onto the battlefield", KeywordCategory::RulesTerm),
    entry("exile", KeywordCategory::ZoneAction),
    entry("shuffle", KeywordCategory::KeywordAction),
    entry("scry", KeywordCategory::KeywordAction),
    entry("sacrifice", KeywordCategory::KeywordAction),
    entry("discard", KeywordCategory::KeywordAction),
    entry("counter a spell or ability", KeywordCategory::RulesTerm),
    entry("counter on a permanent", KeywordCategory::RulesTerm),
    entry("destroy", KeywordCategory::ZoneAction),
    // Damage / combat / life
    entry("damage", KeywordCategory::RulesTerm),
    entry("combat damage", KeywordCategory::RulesTerm),
    entry("deathtouch", KeywordCategory::KeywordAbility),
    entry("double strike", KeywordCategory::KeywordAbility),
    entry("first strike", KeywordCategory::KeywordAbility),
    entry("trample", KeywordCategory::KeywordAbility),
    entry("flying", KeywordCategory::KeywordAbility),
    entry("reach", KeywordCategory::KeywordAbility),
    entry("menace", KeywordCategory::KeywordAbility),
    entry("vigilance", KeywordCategory::KeywordAbility),
    entry("lifelink", KeywordCategory::KeywordAbility),
    entry("haste", KeywordCategory::KeywordAbility),
    entry("goad", KeywordCategory::KeywordAction),
    // Protection / blocking / attacking constraints
    entry("defender", KeywordCategory::KeywordAbility),
    entry("hexproof", KeywordCategory::KeywordAbility),
    entry("indestructible", KeywordCategory::KeywordAbility),
    // Timing & recursion
    entry("flash", KeywordCategory::KeywordAbility),
    entry("flashback", KeywordCategory::KeywordAbility),
    // Control & ownership & players
    entry("control", KeywordCategory::RulesTerm),
    entry("controller", KeywordCategory::RulesTerm),
    entry("owner", KeywordCategory::RulesTerm),
    entry("player", KeywordCategory::RulesTerm),
    entry("opponent", KeywordCategory::RulesTerm),
    entry("you", KeywordCategory::RulesTerm),
];

/// One occurrence of a glossary term in a clause, plus a small window of
/// surrounding tokens.
///
/// Example: clause `'Sacrifice another creature: Draw two cards.'`,
/// keyword `sacrifice`, right context `another creature :`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordHit {
    pub keyword: String,
    pub left_words: Vec<String>,
    pub right_words: Vec<String>,
}

impl KeywordHit {
    pub fn context_str(&self) -> String {
        format!(
            "...{} [{}] {}...",
            self.left_words.join(" "),
            self.keyword,
            self.right_words.join(" ")
        )
    }
}

/// Word-or-symbol tokens with byte spans, like `\w+|\S` would produce.
fn tokenize_with_spans(text: &str) -> Vec<(String, usize, usize)> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;
    let mut word_end = 0usize;

    for (idx, ch) in text.char_indices() {
        if ch.is_alphanumeric() || ch == '_' {
            if word_start.is_none() {
                word_start = Some(idx);
            }
            word_end = idx + ch.len_utf8();
            continue;
        }
        if let Some(start) = word_start.take() {
            tokens.push((text[start..word_end].to_string(), start, word_end));
        }
        if !ch.is_whitespace() {
            tokens.push((ch.to_string(), idx, idx + ch.len_utf8()));
        }
    }
    if let Some(start) = word_start {
        tokens.push((text[start..word_end].to_string(), start, word_end));
    }

    tokens
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Byte offsets of every word-boundary occurrence of `term` in `text`.
fn word_boundary_matches(text: &str, term: &str) -> Vec<usize> {
    let mut positions = Vec::new();
    let bytes = text.as_bytes();
    let mut from = 0usize;
    while let Some(found) = text[from..].find(term) {
        let start = from + found;
        let end = start + term.len();
        let left_ok = start == 0 || !is_word_byte(bytes[start - 1]);
        let right_ok = end == bytes.len() || !is_word_byte(bytes[end]);
        if left_ok && right_ok {
            positions.push(start);
        }
        from = start + 1;
    }
    positions
}

/// Finds every glossary term in a clause and captures up to two tokens of
/// left context and three of right context around each occurrence.
pub fn extract_keyword_hits(clause: &str) -> Vec<KeywordHit> {
    if clause.is_empty() {
        return Vec::new();
    }

    let lower = clause.to_lowercase();
    let tokens = tokenize_with_spans(clause);

    let token_index_at = |byte_pos: usize| -> Option<usize> {
        tokens
            .iter()
            .position(|(_, start, end)| *start <= byte_pos && byte_pos < *end)
    };

    let mut hits = Vec::new();

    for entry in KEYWORD_GLOSSARY {
        for start in word_boundary_matches(&lower, entry.term) {
            let Some(token_idx) = token_index_at(start) else {
                continue;
            };

            let left_start = token_idx.saturating_sub(2);
            let right_end = tokens.len().min(token_idx + 1 + 3);

            hits.push(KeywordHit {
                keyword: entry.term.to_string(),
                left_words: tokens[left_start..token_idx]
                    .iter()
                    .map(|(w, _, _)| w.clone())
                    .collect(),
                right_words: tokens[token_idx + 1..right_end]
                    .iter()
                    .map(|(w, _, _)| w.clone())
                    .collect(),
            });
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sacrifice_hit_with_context() {
        let hits = extract_keyword_hits("Sacrifice another creature: Draw two cards.");
        let sacrifice = hits
            .iter()
            .find(|h| h.keyword == "sacrifice")
            .expect("sacrifice hit");
        assert!(sacrifice.left_words.is_empty());
        assert_eq!(sacrifice.right_words, vec!["another", "creature", ":"]);
    }

    #[test]
    fn test_word_boundaries_respected() {
        // "untap" must not produce a "tap" hit.
        let hits = extract_keyword_hits("Untap target land.");
        assert!(hits.iter().all(|h| h.keyword != "tap"));
    }

    #[test]
    fn test_multi_word_terms() {
        let hits = extract_keyword_hits("When this creature enters the battlefield, scry 1.");
        assert!(hits.iter().any(|h| h.keyword == "enters the battlefield"));
        assert!(hits.iter().any(|h| h.keyword == "scry"));
    }

    #[test]
    fn test_empty_clause() {
        assert!(extract_keyword_hits("").is_empty());
    }

    #[test]
    fn test_context_str_rendering() {
        let hit = KeywordHit {
            keyword: "sacrifice".to_string(),
            left_words: vec![],
            right_words: vec!["another".to_string(), "creature".to_string()],
        };
        assert_eq!(hit.context_str(), "... [sacrifice] another creature...");
    }
}
