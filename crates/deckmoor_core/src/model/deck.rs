//! Deck domain model.
//!
//! # Responsibility
//! - Define the deck document written to and read from the deck store.
//! - Provide lifecycle helpers for soft-delete semantics.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another deck.
//! - `is_deleted` is the source of truth for tombstone state.
//! - Write paths must pass `Deck::validate()` before persistence.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every persisted deck document.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type DeckId = Uuid;

/// Upper bound on deck name length, in characters.
pub const DECK_NAME_MAX_CHARS: usize = 120;

/// Constructed format a deck is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckFormat {
    Commander,
    Standard,
    Modern,
    Pauper,
}

/// One card line inside a deck list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    /// Exact card name as printed.
    pub card_name: String,
    /// Preferred printing, when the builder pinned one.
    pub set_code: Option<String>,
    /// Number of copies. Must be at least 1.
    pub quantity: u16,
}

impl DeckEntry {
    /// Creates an entry with no pinned printing.
    pub fn new(card_name: impl Into<String>, quantity: u16) -> Self {
        Self {
            card_name: card_name.into(),
            set_code: None,
            quantity,
        }
    }
}

/// Canonical deck document.
///
/// The whole record is written verbatim on save and read back verbatim
/// on load; the store never mutates individual fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    /// Stable global ID used as the document key.
    pub uuid: DeckId,
    /// Display name chosen by the builder.
    pub name: String,
    /// Target constructed format.
    pub format: DeckFormat,
    /// Free-form notes about the deck.
    pub description: String,
    /// Card lines making up the deck list.
    pub entries: Vec<DeckEntry>,
    /// Soft delete tombstone to preserve recovery history.
    pub is_deleted: bool,
}

/// Validation failure raised before any deck write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckValidationError {
    EmptyName,
    NameTooLong { chars: usize },
    EmptyCardName { index: usize },
    ZeroQuantity { card_name: String },
}

impl Display for DeckValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "deck name must not be empty"),
            Self::NameTooLong { chars } => write!(
                f,
                "deck name is {chars} characters, maximum is {DECK_NAME_MAX_CHARS}"
            ),
            Self::EmptyCardName { index } => {
                write!(f, "deck entry {index} has an empty card name")
            }
            Self::ZeroQuantity { card_name } => {
                write!(f, "deck entry `{card_name}` has quantity 0")
            }
        }
    }
}

impl Error for DeckValidationError {}

impl Deck {
    /// Creates an empty deck with a generated stable ID.
    ///
    /// # Invariants
    /// - `entries` starts empty and `is_deleted` starts as `false`.
    pub fn new(name: impl Into<String>, format: DeckFormat) -> Self {
        Self::with_id(Uuid::new_v4(), name, format)
    }

    /// Creates a deck with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(uuid: DeckId, name: impl Into<String>, format: DeckFormat) -> Self {
        Self {
            uuid,
            name: name.into(),
            format,
            description: String::new(),
            entries: Vec::new(),
            is_deleted: false,
        }
    }

    /// Checks invariants that must hold before any persistence write.
    ///
    /// # Errors
    /// - Empty or over-long deck name.
    /// - Entry with an empty card name or zero quantity.
    pub fn validate(&self) -> Result<(), DeckValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DeckValidationError::EmptyName);
        }
        let chars = name.chars().count();
        if chars > DECK_NAME_MAX_CHARS {
            return Err(DeckValidationError::NameTooLong { chars });
        }

        for (index, entry) in self.entries.iter().enumerate() {
            if entry.card_name.trim().is_empty() {
                return Err(DeckValidationError::EmptyCardName { index });
            }
            if entry.quantity == 0 {
                return Err(DeckValidationError::ZeroQuantity {
                    card_name: entry.card_name.clone(),
                });
            }
        }

        Ok(())
    }

    /// Marks this deck as softly deleted (tombstoned).
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
    }

    /// Clears the soft delete flag.
    pub fn restore(&mut self) {
        self.is_deleted = false;
    }

    /// Returns whether this deck should be considered visible/active.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }

    /// Total number of cards across all entries.
    pub fn card_count(&self) -> u32 {
        self.entries
            .iter()
            .map(|entry| u32::from(entry.quantity))
            .sum()
    }
}
