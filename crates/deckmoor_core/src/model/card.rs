//! Card catalog read model.
//!
//! # Responsibility
//! - Define the printing-level card record held in the local catalog.
//!
//! # Invariants
//! - Catalog identity is `(set_code, collector_number)`.
//! - A stored `mana_cost` must parse as a brace-symbol cost string.

use crate::model::mana::{mana_value, parse_mana_cost, ManaCostError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One printing of a card in the searchable catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCard {
    /// Exact card name as printed.
    pub name: String,
    /// Set the printing belongs to, e.g. `khm`.
    pub set_code: String,
    /// Collector number inside the set. Kept textual (`"123a"` exists).
    pub collector_number: String,
    /// Full type line, e.g. `Legendary Creature - Elf Druid`.
    pub type_line: String,
    /// Rules text. Empty for vanilla cards.
    pub oracle_text: String,
    /// Brace-symbol cost string, e.g. `{2}{U}{U}`. `None` for lands.
    pub mana_cost: Option<String>,
}

/// Validation failure raised before a catalog write.
#[derive(Debug)]
pub enum CardValidationError {
    EmptyName,
    EmptySetCode,
    EmptyCollectorNumber,
    InvalidManaCost(ManaCostError),
}

impl Display for CardValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "card name must not be empty"),
            Self::EmptySetCode => write!(f, "card set code must not be empty"),
            Self::EmptyCollectorNumber => {
                write!(f, "card collector number must not be empty")
            }
            Self::InvalidManaCost(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CardValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidManaCost(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ManaCostError> for CardValidationError {
    fn from(value: ManaCostError) -> Self {
        Self::InvalidManaCost(value)
    }
}

impl CatalogCard {
    /// Checks invariants that must hold before a catalog write.
    pub fn validate(&self) -> Result<(), CardValidationError> {
        if self.name.trim().is_empty() {
            return Err(CardValidationError::EmptyName);
        }
        if self.set_code.trim().is_empty() {
            return Err(CardValidationError::EmptySetCode);
        }
        if self.collector_number.trim().is_empty() {
            return Err(CardValidationError::EmptyCollectorNumber);
        }
        if let Some(cost) = self.mana_cost.as_deref() {
            parse_mana_cost(cost)?;
        }
        Ok(())
    }

    /// Converted mana cost of this printing.
    ///
    /// Returns `None` when the card has no mana cost at all.
    ///
    /// # Errors
    /// - The stored cost string does not parse as brace symbols.
    pub fn mana_value(&self) -> Result<Option<u32>, ManaCostError> {
        match self.mana_cost.as_deref() {
            Some(cost) => Ok(Some(mana_value(&parse_mana_cost(cost)?))),
            None => Ok(None),
        }
    }
}
