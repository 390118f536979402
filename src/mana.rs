//! Brace-delimited mana symbol scanning.
//!
//! Oracle text encodes costs and mana production as `{..}` tokens:
//! `{2}{G}{G}`, `{T}`, `{W/P}`. This module extracts those tokens and
//! assigns them the coarse totals the tag/atom derivation needs. The tap
//! and untap symbols (`{T}`, `{Q}`) are state changes, not mana, and are
//! excluded from every total.

/// Extracts the contents of every `{..}` token, uppercased.
pub fn mana_symbols(text: &str) -> Vec<String> {
    let mut symbols = Vec::new();
    let mut current: Option<String> = None;
    for ch in text.chars() {
        match ch {
            '{' => current = Some(String::new()),
            '}' => {
                if let Some(symbol) = current.take()
                    && !symbol.is_empty()
                {
                    symbols.push(symbol.to_ascii_uppercase());
                }
            }
            _ => {
                if let Some(symbol) = current.as_mut() {
                    symbol.push(ch);
                }
            }
        }
    }
    symbols
}

/// Returns true for the tap/untap symbols, which never count as mana.
pub fn is_state_symbol(symbol: &str) -> bool {
    matches!(symbol, "T" | "Q")
}

/// Coarse mana contribution of one symbol: numerals count themselves,
/// variables (`X`/`Y`/`Z`) count zero, everything else (colored, hybrid,
/// Phyrexian, snow) counts one.
fn symbol_value(symbol: &str) -> u32 {
    if let Ok(n) = symbol.parse::<u32>() {
        return n;
    }
    match symbol {
        "X" | "Y" | "Z" => 0,
        _ => 1,
    }
}

/// Total coarse mana across symbols, skipping tap/untap.
pub fn mana_value_of(symbols: &[String]) -> u32 {
    symbols
        .iter()
        .filter(|s| !is_state_symbol(s))
        .map(|s| symbol_value(s))
        .sum()
}

/// Best-effort parse of mana production from an "add" clause.
///
/// Handles both plain production (`"Add {G}{G}."`) and choice production
/// (`"Add {G} or {U}."`). Choices take the maximum option as the produced
/// amount; that is a scoring policy, not a rules claim. Returns the amount
/// and a `|`-joined subtype string of the options, or `None` when the
/// clause has no add-with-symbols shape.
pub fn mana_from_add_clause(text: &str) -> Option<(i32, String)> {
    let lower = text.to_lowercase();
    if !lower.contains("add") || !lower.contains('{') {
        return None;
    }

    let mut option_amounts: Vec<u32> = Vec::new();
    let mut option_subtypes: Vec<String> = Vec::new();

    for part in lower.split(" or ") {
        let symbols: Vec<String> = mana_symbols(part)
            .into_iter()
            .filter(|s| !is_state_symbol(s))
            .collect();
        if symbols.is_empty() {
            continue;
        }
        option_amounts.push(mana_value_of(&symbols));
        option_subtypes.push(symbols.concat());
    }

    let best = option_amounts.iter().copied().max()?;
    Some((best as i32, option_subtypes.join("|")))
}
