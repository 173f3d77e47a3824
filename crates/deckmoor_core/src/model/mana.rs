//! Brace-symbol mana cost parsing.
//!
//! # Responsibility
//! - Parse cost strings like `{2}{U}{U}` into typed symbols.
//! - Derive mana value from a parsed symbol list.
//!
//! # Invariants
//! - Text outside `{...}` groups is rejected, not skipped.
//! - An empty cost string parses to an empty symbol list.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static MANA_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}]*)\}").expect("valid mana symbol regex"));

/// One symbol of a mana cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManaSymbol {
    White,
    Blue,
    Black,
    Red,
    Green,
    Colorless,
    /// `{X}`, counted as zero until a value is chosen.
    Variable,
    /// `{0}`, `{2}`, `{15}` and friends.
    Generic(u32),
}

impl ManaSymbol {
    /// Contribution of this symbol to the mana value.
    pub fn mana_value(self) -> u32 {
        match self {
            Self::Generic(amount) => amount,
            Self::Variable => 0,
            _ => 1,
        }
    }
}

/// Parse failure for a mana cost string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManaCostError {
    /// A `{...}` group whose content is not a known symbol.
    UnknownSymbol { symbol: String },
    /// Characters between or around brace groups.
    UnexpectedText { text: String },
}

impl Display for ManaCostError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownSymbol { symbol } => {
                write!(f, "unknown mana symbol `{{{symbol}}}`")
            }
            Self::UnexpectedText { text } => {
                write!(f, "unexpected text `{text}` in mana cost")
            }
        }
    }
}

impl Error for ManaCostError {}

/// Parses a brace-symbol cost string into symbols, left to right.
///
/// # Errors
/// - Any text outside brace groups.
/// - Any brace group that is not `W U B R G C X` or a number.
pub fn parse_mana_cost(cost: &str) -> Result<Vec<ManaSymbol>, ManaCostError> {
    let trimmed = cost.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let mut symbols = Vec::new();
    let mut cursor = 0;
    for group in MANA_SYMBOL_RE.find_iter(trimmed) {
        if group.start() != cursor {
            return Err(ManaCostError::UnexpectedText {
                text: trimmed[cursor..group.start()].to_string(),
            });
        }
        cursor = group.end();

        let inner = group.as_str().trim_start_matches('{').trim_end_matches('}');
        symbols.push(parse_symbol(inner)?);
    }

    if cursor != trimmed.len() {
        return Err(ManaCostError::UnexpectedText {
            text: trimmed[cursor..].to_string(),
        });
    }

    Ok(symbols)
}

/// Sums symbol contributions into the converted mana cost.
pub fn mana_value(symbols: &[ManaSymbol]) -> u32 {
    symbols.iter().map(|symbol| symbol.mana_value()).sum()
}

fn parse_symbol(inner: &str) -> Result<ManaSymbol, ManaCostError> {
    match inner {
        "W" => Ok(ManaSymbol::White),
        "U" => Ok(ManaSymbol::Blue),
        "B" => Ok(ManaSymbol::Black),
        "R" => Ok(ManaSymbol::Red),
        "G" => Ok(ManaSymbol::Green),
        "C" => Ok(ManaSymbol::Colorless),
        "X" => Ok(ManaSymbol::Variable),
        other => other
            .parse::<u32>()
            .map(ManaSymbol::Generic)
            .map_err(|_| ManaCostError::UnknownSymbol {
                symbol: other.to_string(),
            }),
    }
}
