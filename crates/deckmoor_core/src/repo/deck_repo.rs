//! Deck repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable save/load/delete APIs over canonical `decks` storage.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `save_deck` is an upsert keyed by `uuid`; the stored document is
//!   replaced wholesale, `created_at` survives the replacement.
//! - Write paths must call `Deck::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::card::CardValidationError;
use crate::model::deck::{Deck, DeckEntry, DeckFormat, DeckId, DeckValidationError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const DECK_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    format,
    description,
    entries_json,
    is_deleted
FROM decks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for deck and catalog persistence.
#[derive(Debug)]
pub enum RepoError {
    InvalidDeck(DeckValidationError),
    InvalidCard(CardValidationError),
    Db(DbError),
    NotFound(DeckId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDeck(err) => write!(f, "{err}"),
            Self::InvalidCard(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "deck not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDeck(err) => Some(err),
            Self::InvalidCard(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DeckValidationError> for RepoError {
    fn from(value: DeckValidationError) -> Self {
        Self::InvalidDeck(value)
    }
}

impl From<CardValidationError> for RepoError {
    fn from(value: CardValidationError) -> Self {
        Self::InvalidCard(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing decks.
#[derive(Debug, Clone, Default)]
pub struct DeckListQuery {
    pub format: Option<DeckFormat>,
    pub include_deleted: bool,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for deck persistence.
pub trait DeckRepository {
    /// Writes the deck document, replacing any document with the same id.
    fn save_deck(&self, deck: &Deck) -> RepoResult<DeckId>;
    /// Reads one deck by id with optional tombstone visibility.
    fn get_deck(&self, id: DeckId, include_deleted: bool) -> RepoResult<Option<Deck>>;
    /// Reads all decks matching the query.
    fn list_decks(&self, query: &DeckListQuery) -> RepoResult<Vec<Deck>>;
    /// Tombstones one deck by id. Idempotent for existing decks.
    fn soft_delete_deck(&self, id: DeckId) -> RepoResult<()>;
}

/// SQLite-backed deck repository.
pub struct SqliteDeckRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDeckRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DeckRepository for SqliteDeckRepository<'_> {
    fn save_deck(&self, deck: &Deck) -> RepoResult<DeckId> {
        deck.validate()?;
        let entries_json = encode_entries(&deck.entries)?;

        self.conn.execute(
            "INSERT INTO decks (
                uuid,
                name,
                format,
                description,
                entries_json,
                is_deleted
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT (uuid) DO UPDATE SET
                name = excluded.name,
                format = excluded.format,
                description = excluded.description,
                entries_json = excluded.entries_json,
                is_deleted = excluded.is_deleted,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                deck.uuid.to_string(),
                deck.name.as_str(),
                deck_format_to_db(deck.format),
                deck.description.as_str(),
                entries_json,
                bool_to_int(deck.is_deleted),
            ],
        )?;

        Ok(deck.uuid)
    }

    fn get_deck(&self, id: DeckId, include_deleted: bool) -> RepoResult<Option<Deck>> {
        let mut stmt = self.conn.prepare(&format!(
            "{DECK_SELECT_SQL}
             WHERE uuid = ?1
               AND (?2 = 1 OR is_deleted = 0);"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), bool_to_int(include_deleted)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_deck_row(row)?));
        }

        Ok(None)
    }

    fn list_decks(&self, query: &DeckListQuery) -> RepoResult<Vec<Deck>> {
        let mut sql = format!("{DECK_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if !query.include_deleted {
            sql.push_str(" AND is_deleted = 0");
        }

        if let Some(format) = query.format {
            sql.push_str(" AND format = ?");
            bind_values.push(Value::Text(deck_format_to_db(format).to_string()));
        }

        sql.push_str(" ORDER BY updated_at DESC, uuid ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut decks = Vec::new();

        while let Some(row) = rows.next()? {
            decks.push(parse_deck_row(row)?);
        }

        Ok(decks)
    }

    fn soft_delete_deck(&self, id: DeckId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE decks
             SET
                is_deleted = 1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_deck_row(row: &Row<'_>) -> RepoResult<Deck> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in decks.uuid"))
    })?;

    let format_text: String = row.get("format")?;
    let format = parse_deck_format(&format_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid deck format `{format_text}` in decks.format"
        ))
    })?;

    let entries_text: String = row.get("entries_json")?;
    let entries = decode_entries(&entries_text)?;

    let is_deleted = match row.get::<_, i64>("is_deleted")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_deleted value `{other}` in decks.is_deleted"
            )));
        }
    };

    let deck = Deck {
        uuid,
        name: row.get("name")?,
        format,
        description: row.get("description")?,
        entries,
        is_deleted,
    };
    deck.validate()?;
    Ok(deck)
}

fn encode_entries(entries: &[DeckEntry]) -> RepoResult<String> {
    serde_json::to_string(entries)
        .map_err(|err| RepoError::InvalidData(format!("deck entries failed to encode: {err}")))
}

fn decode_entries(entries_json: &str) -> RepoResult<Vec<DeckEntry>> {
    serde_json::from_str(entries_json).map_err(|err| {
        RepoError::InvalidData(format!(
            "invalid entries document in decks.entries_json: {err}"
        ))
    })
}

fn deck_format_to_db(format: DeckFormat) -> &'static str {
    match format {
        DeckFormat::Commander => "commander",
        DeckFormat::Standard => "standard",
        DeckFormat::Modern => "modern",
        DeckFormat::Pauper => "pauper",
    }
}

fn parse_deck_format(value: &str) -> Option<DeckFormat> {
    match value {
        "commander" => Some(DeckFormat::Commander),
        "standard" => Some(DeckFormat::Standard),
        "modern" => Some(DeckFormat::Modern),
        "pauper" => Some(DeckFormat::Pauper),
        _ => None,
    }
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
