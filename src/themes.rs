//! Theme detection from oracle text and keyword abilities.
//!
//! Two read-only tables drive this: literal phrase lists per theme, and a
//! keyword-ability to theme mapping for mechanics whose reminder text
//! rarely spells the theme out. Both are immutable configuration shared
//! by value; detection is a pure function of the input strings.

use std::collections::BTreeSet;

/// Phrase patterns for one theme. The first phrase hit claims the theme;
/// no double counting within a theme.
pub struct ThemeRule {
    pub theme: &'static str,
    pub phrases: &'static [&'static str],
}

pub const THEME_KEYWORDS: &[ThemeRule] = &[
    ThemeRule {
        theme: "tokens",
        phrases: &[
            "create a token",
            "create one or more tokens",
            "create a 1/1",
            "create a 2/2",
            "create a 3/3",
            "creature token",
            "artifact token",
            "enchantment token",
            "token that's a copy",
            "tokens you control",
            "treasure token",
            "clue token",
            "food token",
            "blood token",
            "incubator token",
            "map token",
            "servo token",
            "thopter token",
            "germ token",
            "populate",
            "myriad",
            "afterlife",
            "encore",
            "training",
            "rally",
            "alliance",
            "amass",
            "investigate",
            "incubate",
            "embalm",
            "eternalize",
            "disturb",
        ],
    },
    ThemeRule {
        theme: "sacrifice",
        phrases: &[
            "sacrifice a creature",
            "sacrifice another creature",
            "sacrifice a permanent",
            "sacrifice an artifact",
            "sacrifice an enchantment",
            "sacrifice a land",
            "sacrifice this creature",
            "sacrifice it",
            "whenever a creature dies",
            "whenever another creature dies",
            "when a creature you control dies",
            "whenever a nontoken creature you control dies",
            "whenever a creature you control dies",
            "dies, each opponent",
            "exploit",
            "morbid",
        ],
    },
    ThemeRule {
        theme: "spellslinger",
        phrases: &[
            "instant or sorcery spell",
            "noncreature spell",
            "whenever you cast an instant",
            "whenever you cast a sorcery",
            "whenever you cast a noncreature spell",
            "whenever you cast a spell,",
            "copy that spell",
            "copy target instant or sorcery",
            "storm",
            "prowess",
            "magecraft",
            "flashback",
            "jump-start",
            "rebound",
            "delve",
            "buyback",
            "cascade",
            "you may cast target instant",
            "you may cast target sorcery",
            "cast target instant or sorcery card from your graveyard",
            "cast spells from your graveyard",
        ],
    },
    ThemeRule {
        theme: "counters",
        phrases: &[
            "+1/+1 counter",
            "put a +1/+1 counter",
            "additional +1/+1 counters",
            "distribute +1/+1 counters",
            "number of +1/+1 counters",
            "counter on target permanent",
            "counters on target permanent",
            "counters on it",
            "remove a counter from",
            "double the number of counters",
            "for each counter on",
            "proliferate",
            "energy counter",
            "experience counter",
            "shield counter",
            "oil counter",
            "loyalty counter",
            "adapt",
            "bolster",
            "support",
            "outlast",
            "mentor",
            "explore",
            "level up",
            "saga",
            "evolve",
            "graft",
            "modular",
        ],
    },
    ThemeRule {
        theme: "artifacts",
        phrases: &[
            "artifact you control",
            "artifacts you control",
            "artifact spell",
            "artifact creature",
            "noncreature artifact",
            "equipment",
            "equipment you control",
            "equipped creature",
            "vehicles you control",
            "vehicle",
            "treasure token",
            "clue token",
            "food token",
            "blood token",
            "servo token",
            "thopter token",
            "germ token",
            "affinity for artifacts",
            "metalcraft",
            "improvise",
            "fabricate",
            "living weapon",
            "modular",
            "equip {",
            "reconfigure",
        ],
    },
    ThemeRule {
        theme: "lifegain",
        phrases: &[
            "you gain life",
            "you gain x life",
            "gain life equal to",
            "gains life equal to",
            "gains that much life",
            "life for each",
            "whenever you gain life",
            "for each 1 life you gained",
            "for each life you gained",
            "lifelink",
            "extort",
        ],
    },
    ThemeRule {
        theme: "lands",
        phrases: &[
            "landfall",
            "whenever a land enters the battlefield",
            "whenever a land enters the battlefield under your control",
            "whenever one or more lands enter the battlefield under your control",
            "play an additional land",
            "you may play an additional land",
            "you may play an extra land",
            "search your library for a land card",
            "search your library for a basic land card",
            "search your library for a forest card",
            "put a land card from your hand onto the battlefield",
            "put a land card from your graveyard onto the battlefield",
            "onto the battlefield tapped, then shuffle",
            "domain",
            "landcycling",
            "basic landcycling",
            "awaken",
            "for each land you control",
            "equal to the number of lands you control",
            "return target land card from your graveyard",
            "lands in your graveyard",
            "for each land card in your graveyard",
            "create a tapped land token",
            "create a colorless land token",
        ],
    },
    ThemeRule {
        theme: "graveyard",
        phrases: &[
            "from your graveyard",
            "from their graveyard",
            "from each graveyard",
            "from all graveyards",
            "cards in your graveyard",
            "creature cards in your graveyard",
            "return target creature card from your graveyard",
            "return target card from your graveyard",
            "return any number of target creature cards",
            "exile target card from a graveyard",
            "exile all cards from target player's graveyard",
            "mill a card",
            "mill two cards",
            "mill three cards",
            "mill four cards",
            "mills a card",
            "put the top card of your library into your graveyard",
            "put the top two cards of your library into your graveyard",
            "put the top three cards of your library into your graveyard",
            "escape",
            "flashback",
            "jump-start",
            "unearth",
            "dredge",
            "persist",
            "undying",
            "embalm",
            "eternalize",
            "disturb",
            "delirium",
            "threshold",
            "encore",
            "return target creature card from a graveyard to the battlefield",
            "return target creature card from your graveyard to the battlefield",
            "you may cast creature spells from your graveyard",
            "cast target creature card from your graveyard",
        ],
    },
    ThemeRule {
        theme: "control",
        phrases: &[
            "counter target spell",
            "counter target noncreature spell",
            "counter target creature spell",
            "destroy all creatures",
            "exile all creatures",
            "destroy all nonland permanents",
            "exile all nonland permanents",
            "each creature gets -",
            "all creatures get -",
            "players can't cast more than one spell each turn",
            "players can't draw more than one card each turn",
            "spells your opponents cast cost",
            "spells your opponent casts cost",
            "spells your opponents cast cost {1} more",
            "creatures your opponents control get",
            "creatures your opponents control enter the battlefield tapped",
            "players can't gain life",
            "your opponents can't gain life",
            "players can't search libraries",
            "your opponents can't search libraries",
            "each opponent sacrifices a creature",
            "each opponent sacrifices a permanent",
            "each player sacrifices a creature",
            "each player sacrifices a permanent",
            "skip your draw step",
            "tapped creatures don't untap",
            "skip your untap step",
            "doesn't untap during its controller's untap step",
            "can't attack or block",
            "can't attack you or a planeswalker you control",
            "can't attack you or planeswalkers you control",
            "at the beginning of each opponent's upkeep",
            "at the beginning of each player's upkeep",
        ],
    },
    ThemeRule {
        theme: "voltron",
        phrases: &[
            "equipped creature gets",
            "equipped creature has",
            "equipped creature has hexproof",
            "equipped creature has indestructible",
            "equipped creature gets +",
            "equipped creature can't be blocked",
            "equip {",
            "reconfigure",
            "enchant creature you control",
            "enchant creature you own",
            "enchant legendary creature",
            "enchant commander",
            "target creature gets +",
            "target creature gets +x/+x",
            "target creature you control gets +",
            "target creature you control gains hexproof",
            "target creature you control gains indestructible",
            "target creature you control gains double strike",
            "target creature you control can't be blocked",
            "whenever enchanted creature deals combat damage",
            "whenever equipped creature deals combat damage",
            "deals combat damage to a player, do",
        ],
    },
];

/// Keyword ability → themes, for mechanics whose oracle text alone does
/// not name the theme.
pub const KEYWORD_THEME_OVERRIDES: &[(&str, &[&str])] = &[
    // Evergreen combat & protection
    ("deathtouch", &["control", "voltron"]),
    ("defender", &["control"]),
    ("double strike", &["voltron"]),
    ("enchant", &["voltron", "control"]),
    ("equip", &["artifacts", "voltron"]),
    ("first strike", &["voltron"]),
    ("flash", &["control", "spellslinger"]),
    ("flying", &["voltron", "control"]),
    ("haste", &["voltron"]),
    ("hexproof", &["voltron", "control"]),
    ("indestructible", &["voltron", "control"]),
    ("intimidate", &["voltron"]),
    ("landwalk", &["lands", "voltron"]),
    ("lifelink", &["lifegain", "voltron"]),
    ("protection", &["voltron", "control"]),
    ("reach", &["control"]),
    ("shroud", &["voltron", "control"]),
    ("trample", &["voltron", "counters"]),
    ("vigilance", &["voltron", "control"]),
    ("ward", &["voltron", "control"]),
    // Old/weird combat stuff
    ("banding", &["voltron"]),
    ("rampage", &["voltron"]),
    ("cumulative upkeep", &["control"]),
    ("flanking", &["voltron"]),
    ("phasing", &["control"]),
    // Spell recursion / cost tweaks / spellstorm
    ("buyback", &["spellslinger", "control"]),
    ("cycling", &["spellslinger", "graveyard"]),
    ("echo", &["control"]),
    ("kicker", &["spellslinger"]),
    ("flashback", &["spellslinger", "graveyard"]),
    ("madness", &["spellslinger", "graveyard"]),
    ("storm", &["spellslinger", "control"]),
    ("entwine", &["spellslinger"]),
    ("splice", &["spellslinger"]),
    ("replicate", &["spellslinger"]),
    ("forecast", &["control", "spellslinger"]),
    ("ripple", &["spellslinger"]),
    ("split second", &["control"]),
    ("suspend", &["spellslinger", "control"]),
    ("vanishing", &["control"]),
    ("delve", &["spellslinger", "graveyard"]),
    ("conspire", &["spellslinger"]),
    ("retrace", &["spellslinger", "graveyard"]),
    ("cascade", &["spellslinger"]),
    ("rebound", &["spellslinger"]),
    ("miracle", &["spellslinger"]),
    ("overload", &["spellslinger", "control"]),
    ("fuse", &["spellslinger"]),
    ("undaunted", &["spellslinger"]),
    ("assist", &["spellslinger"]),
    ("jump-start", &["spellslinger", "graveyard"]),
    ("surge", &["spellslinger"]),
    ("escalate", &["spellslinger"]),
    ("foretell", &["spellslinger", "control"]),
    ("demonstrate", &["spellslinger"]),
    ("plot", &["spellslinger"]),
    ("spree", &["spellslinger"]),
    ("freerunning", &["spellslinger", "voltron"]),
    // Artifacts / vehicles / equipment
    ("affinity", &["artifacts"]),
    ("modular", &["artifacts", "counters"]),
    ("sunburst", &["artifacts", "counters", "lands"]),
    ("fortify", &["artifacts", "lands"]),
    ("living weapon", &["artifacts", "tokens", "voltron"]),
    ("improvise", &["artifacts", "spellslinger"]),
    ("crew", &["artifacts", "voltron"]),
    ("fabricate", &["artifacts", "tokens"]),
    ("reconfigure", &["artifacts", "voltron"]),
    ("prototype", &["artifacts"]),
    ("living metal", &["artifacts", "voltron"]),
    ("more than meets the eye", &["artifacts", "voltron", "spellslinger"]),
    ("for mirrodin!", &["artifacts", "tokens", "voltron"]),
    ("craft", &["artifacts", "graveyard"]),
    // Counters-focused mechanics
    ("amplify", &["counters"]),
    ("graft", &["counters"]),
    ("level up", &["counters"]),
    ("evolve", &["counters"]),
    ("outlast", &["counters"]),
    ("mentor", &["counters", "voltron"]),
    ("riot", &["counters", "voltron"]),
    ("training", &["counters", "voltron"]),
    ("compleated", &["counters"]),
    ("backup", &["counters", "voltron"]),
    ("ravenous", &["counters"]),
    ("offspring", &["counters", "tokens"]),
    ("bloodthirst", &["counters", "voltron"]),
    ("reinforce", &["counters"]),
    ("mutate", &["counters", "graveyard"]),
    // Lifegain / drain
    ("absorb", &["lifegain", "control"]),
    ("extort", &["lifegain", "control"]),
    ("gift", &["tokens", "lifegain"]),
    // Lands / land-based
    ("awaken", &["lands", "counters"]),
    ("landcycling", &["lands", "graveyard"]),
    ("basic landcycling", &["lands", "graveyard"]),
    ("domain", &["lands", "control"]),
    // Graveyard mechanics
    ("dredge", &["graveyard"]),
    ("recover", &["graveyard"]),
    ("soulshift", &["graveyard"]),
    ("unearth", &["graveyard"]),
    ("persist", &["graveyard", "sacrifice", "counters"]),
    ("wither", &["control", "voltron"]),
    ("undying", &["graveyard", "counters"]),
    ("scavenge", &["graveyard", "counters"]),
    ("escape", &["graveyard", "spellslinger"]),
    ("embalm", &["graveyard", "tokens"]),
    ("eternalize", &["graveyard", "tokens"]),
    ("disturb", &["graveyard", "tokens"]),
    ("aftermath", &["graveyard", "spellslinger"]),
    ("surveil", &["graveyard", "control"]),
    ("connive", &["graveyard", "counters"]),
    ("descend", &["graveyard"]),
    ("evoke", &["graveyard", "spellslinger"]),
    ("emerge", &["graveyard", "artifacts"]),
    ("blitz", &["voltron", "graveyard"]),
    ("decayed", &["tokens", "graveyard"]),
    ("haunt", &["graveyard", "control"]),
    ("transfigure", &["spellslinger", "graveyard"]),
    // Sacrifice / aristocrats-adjacent
    ("exploit", &["sacrifice", "graveyard"]),
    ("devour", &["sacrifice", "tokens", "counters"]),
    ("champion", &["sacrifice", "graveyard"]),
    ("casualty", &["sacrifice", "spellslinger"]),
    ("bargain", &["sacrifice", "spellslinger"]),
    ("offering", &["sacrifice", "spellslinger"]),
    ("afterlife", &["tokens", "graveyard", "sacrifice"]),
    // Tokens / go-wide / bodies
    ("myriad", &["tokens"]),
    ("battle cry", &["tokens", "voltron"]),
    ("encore", &["tokens", "graveyard"]),
    ("squad", &["tokens"]),
    ("saddle", &["tokens", "voltron"]),
    ("convoke", &["tokens", "spellslinger"]),
    ("battalion", &["tokens", "voltron"]),
    ("pack tactics", &["tokens", "voltron"]),
    ("celebrate", &["tokens"]),
    // Voltron / tall strategy
    ("exalted", &["voltron"]),
    ("annihilator", &["voltron", "control"]),
    ("umbra armor", &["voltron"]),
    ("infect", &["voltron", "counters"]),
    ("soulbond", &["voltron"]),
    ("bestow", &["voltron"]),
    ("tribute", &["voltron", "counters"]),
    ("dethrone", &["voltron"]),
    ("prowess", &["spellslinger"]),
    ("dash", &["voltron"]),
    ("menace", &["voltron"]),
    ("renown", &["voltron"]),
    ("melee", &["voltron"]),
    ("partner", &["voltron", "control"]),
    ("boast", &["voltron"]),
    ("enlist", &["voltron"]),
    ("toxic", &["voltron", "control"]),
    ("disguise", &["voltron", "control"]),
    ("bushido", &["voltron"]),
    ("shadow", &["voltron"]),
    ("horsemanship", &["voltron"]),
    ("fear", &["voltron"]),
    ("provoke", &["voltron"]),
    ("prowl", &["voltron"]),
    ("skulk", &["voltron"]),
    // Control / prison / disruption
    ("ninjutsu", &["control", "voltron"]),
    ("epic", &["control", "spellslinger"]),
    ("ascend", &["control"]),
    ("companion", &["control"]),
    ("afflict", &["control"]),
    ("hidden agenda", &["control"]),
    ("daybound", &["control"]),
    ("nightbound", &["control"]),
    ("space sculptor", &["control"]),
    ("visit", &["control"]),
    ("solved", &["control", "spellslinger"]),
    ("impending", &["control", "spellslinger"]),
    ("fading", &["control"]),
    ("morph", &["control"]),
    ("transmute", &["spellslinger", "control"]),
    ("poisonous", &["voltron", "control"]),
    ("changeling", &["control"]),
    ("hideaway", &["control"]),
    ("cleave", &["spellslinger"]),
    ("read ahead", &["control"]),
];

/// Detects every theme a card appears to match, from oracle text plus
/// type line plus declared keyword abilities.
///
/// Phrase tables run first, then keyword overrides, then a few broad
/// backstops that catch weird templating.
pub fn detect_themes(
    oracle_text: &str,
    type_line: &str,
    keywords: &[String],
) -> BTreeSet<&'static str> {
    let text = format!("{} {}", oracle_text, type_line).to_lowercase();
    let mut matched = BTreeSet::new();

    for rule in THEME_KEYWORDS {
        if rule.phrases.iter().any(|phrase| text.contains(phrase)) {
            matched.insert(rule.theme);
        }
    }

    for keyword in keywords {
        let keyword = keyword.to_lowercase();
        for (term, themes) in KEYWORD_THEME_OVERRIDES {
            if *term == keyword {
                matched.extend(themes.iter().copied());
            }
        }
    }

    // Broad backstops.
    if text.contains("graveyard") {
        matched.insert("graveyard");
    }
    if text.contains("gain") && text.contains("life") {
        matched.insert("lifegain");
    }
    if text.contains("lands you control") || text.contains("land you control") {
        matched.insert("lands");
    }
    if text.contains("counters on target") || text.contains("counters on it") {
        matched.insert("counters");
    }
    if text.contains("players can't") {
        matched.insert("control");
    }

    matched
}

/// Theme detection over bare text, for per-effect tagging.
pub fn detect_text_themes(text: &str) -> BTreeSet<&'static str> {
    let lower = text.to_lowercase();
    let mut matched = BTreeSet::new();
    for rule in THEME_KEYWORDS {
        if rule.phrases.iter().any(|phrase| lower.contains(phrase)) {
            matched.insert(rule.theme);
        }
    }
    matched
}
