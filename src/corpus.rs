//! Tolerant corpus input rows.
//!
//! The loader upstream of this crate hands over Scryfall-shaped records.
//! Every field except the name may be absent, null, or the wrong shape;
//! accessors degrade to safe defaults (empty string, empty list, 0.0)
//! rather than failing. Only actually reading a corpus file can fail.

#[cfg(feature = "serialization")]
use std::fs::File;
#[cfg(feature = "serialization")]
use std::io::BufReader;
#[cfg(feature = "serialization")]
use std::path::Path;

#[cfg(feature = "serialization")]
use serde::Deserialize;
use thiserror::Error;

/// Errors reading a corpus file. Parsing a row never fails; only I/O and
/// top-level JSON shape can.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus file: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serialization")]
    #[error("failed to parse corpus JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A value that may arrive as a list of strings or one delimited string.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Deserialize))]
#[cfg_attr(feature = "serialization", serde(untagged))]
pub enum ListOrString {
    List(Vec<String>),
    Text(String),
}

/// A numeric field that may arrive as a number or a string.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Deserialize))]
#[cfg_attr(feature = "serialization", serde(untagged))]
pub enum NumberLike {
    Number(f64),
    Text(String),
}

/// One corpus record as loaded, before normalization.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serialization", derive(Deserialize))]
#[cfg_attr(feature = "serialization", serde(default))]
pub struct CardRow {
    pub name: String,
    pub oracle_text: Option<String>,
    pub type_line: Option<String>,
    pub mana_cost: Option<String>,
    pub cmc: Option<NumberLike>,
    pub keywords: Option<ListOrString>,
    pub color_identity: Option<ListOrString>,
    pub power: Option<NumberLike>,
    pub toughness: Option<NumberLike>,
    pub loyalty: Option<NumberLike>,
}

fn split_bracket_list(text: &str) -> Vec<String> {
    let inner = &text[1..text.len() - 1];
    inner
        .split(',')
        .map(|part| part.trim_matches(|c: char| c.is_whitespace() || c == '\'' || c == '"'))
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn list_of(value: &Option<ListOrString>) -> Vec<String> {
    match value {
        Some(ListOrString::List(items)) => items.clone(),
        Some(ListOrString::Text(text)) => {
            let text = text.trim();
            if text.starts_with('[') && text.ends_with(']') && text.len() >= 2 {
                split_bracket_list(text)
            } else {
                text.split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(str::to_string)
                    .collect()
            }
        }
        None => Vec::new(),
    }
}

fn number_of(value: &Option<NumberLike>) -> Option<f64> {
    match value {
        Some(NumberLike::Number(n)) => Some(*n),
        Some(NumberLike::Text(text)) => text.trim().parse::<f64>().ok(),
        None => None,
    }
}

impl CardRow {
    pub fn oracle_text(&self) -> &str {
        self.oracle_text.as_deref().unwrap_or_default()
    }

    pub fn type_line(&self) -> &str {
        self.type_line.as_deref().unwrap_or_default()
    }

    pub fn mana_cost(&self) -> &str {
        self.mana_cost.as_deref().unwrap_or_default()
    }

    /// Mana value, `0.0` for absent, unparseable, or non-finite input.
    pub fn mana_value(&self) -> f64 {
        match number_of(&self.cmc) {
            Some(value) if value.is_finite() => value,
            _ => 0.0,
        }
    }

    /// Declared keyword abilities, whether listed or comma-joined.
    pub fn keywords(&self) -> Vec<String> {
        list_of(&self.keywords)
    }

    /// Color-identity letters, whether listed or a bracketed string like
    /// `"['W', 'G']"`.
    pub fn color_identity(&self) -> Vec<String> {
        list_of(&self.color_identity)
    }

    /// Power as an integer, `None` for `*` and friends.
    pub fn power(&self) -> Option<i32> {
        number_of(&self.power).map(|n| n as i32)
    }

    pub fn toughness(&self) -> Option<i32> {
        number_of(&self.toughness).map(|n| n as i32)
    }

    pub fn loyalty(&self) -> Option<i32> {
        number_of(&self.loyalty).map(|n| n as i32)
    }
}

/// Loads a JSON array of rows from disk.
#[cfg(feature = "serialization")]
pub fn load_rows(path: impl AsRef<Path>) -> Result<Vec<CardRow>, CorpusError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let rows = serde_json::from_reader(reader)?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_fields() {
        let row = CardRow {
            name: "Test".to_string(),
            ..Default::default()
        };
        assert_eq!(row.oracle_text(), "");
        assert_eq!(row.mana_value(), 0.0);
        assert!(row.keywords().is_empty());
        assert!(row.color_identity().is_empty());
        assert_eq!(row.power(), None);
    }

    #[test]
    fn test_keywords_from_comma_string() {
        let row = CardRow {
            name: "Test".to_string(),
            keywords: Some(ListOrString::Text("Flying, Lifelink".to_string())),
            ..Default::default()
        };
        assert_eq!(row.keywords(), vec!["Flying", "Lifelink"]);
    }

    #[test]
    fn test_color_identity_from_bracket_string() {
        let row = CardRow {
            name: "Test".to_string(),
            color_identity: Some(ListOrString::Text("['W', 'G']".to_string())),
            ..Default::default()
        };
        assert_eq!(row.color_identity(), vec!["W", "G"]);
    }

    #[test]
    fn test_non_finite_mana_value_degrades_to_zero() {
        let row = CardRow {
            name: "Test".to_string(),
            cmc: Some(NumberLike::Number(f64::NAN)),
            ..Default::default()
        };
        assert_eq!(row.mana_value(), 0.0);

        let row = CardRow {
            name: "Test".to_string(),
            cmc: Some(NumberLike::Text("not a number".to_string())),
            ..Default::default()
        };
        assert_eq!(row.mana_value(), 0.0);
    }

    #[test]
    fn test_star_power_is_none() {
        let row = CardRow {
            name: "Test".to_string(),
            power: Some(NumberLike::Text("*".to_string())),
            toughness: Some(NumberLike::Text("3".to_string())),
            ..Default::default()
        };
        assert_eq!(row.power(), None);
        assert_eq!(row.toughness(), Some(3));
    }

    #[cfg(feature = "serialization")]
    #[test]
    fn test_row_deserialization_tolerates_shapes() {
        let json = r#"{
            "name": "Shape Shifter",
            "oracle_text": "Draw a card.",
            "cmc": "3",
            "keywords": ["Flying"],
            "color_identity": "UG"
        }"#;
        let row: CardRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.mana_value(), 3.0);
        assert_eq!(row.keywords(), vec!["Flying"]);
        // A plain string is read as one comma-less entry.
        assert_eq!(row.color_identity(), vec!["UG"]);
    }
}
