//! Card catalog repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Own catalog imports that keep the search index consistent.
//! - Provide printing-level lookups over `cards`.
//!
//! # Invariants
//! - `import_cards` validates every card before any row is written.
//! - An import is all-or-nothing inside a single transaction.
//! - Catalog rows are keyed by `(set_code, collector_number)`.

use crate::model::card::CatalogCard;
use crate::repo::deck_repo::RepoResult;
use rusqlite::{params, Connection, Row, TransactionBehavior};

const CARD_SELECT_SQL: &str = "SELECT
    name,
    set_code,
    collector_number,
    type_line,
    oracle_text,
    mana_cost
FROM cards";

/// Repository interface for the card catalog.
pub trait CardRepository {
    /// Upserts a batch of printings, returning the number of rows written.
    fn import_cards(&mut self, cards: &[CatalogCard]) -> RepoResult<u32>;
    /// Reads one printing by catalog identity.
    fn get_card(&self, set_code: &str, collector_number: &str)
        -> RepoResult<Option<CatalogCard>>;
    /// Number of printings currently in the catalog.
    fn catalog_size(&self) -> RepoResult<u64>;
}

/// SQLite-backed card catalog repository.
pub struct SqliteCardRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteCardRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl CardRepository for SqliteCardRepository<'_> {
    fn import_cards(&mut self, cards: &[CatalogCard]) -> RepoResult<u32> {
        for card in cards {
            card.validate()?;
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut written = 0u32;
        for card in cards {
            tx.execute(
                "INSERT INTO cards (
                    name,
                    set_code,
                    collector_number,
                    type_line,
                    oracle_text,
                    mana_cost
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ON CONFLICT (set_code, collector_number) DO UPDATE SET
                    name = excluded.name,
                    type_line = excluded.type_line,
                    oracle_text = excluded.oracle_text,
                    mana_cost = excluded.mana_cost;",
                params![
                    card.name.as_str(),
                    card.set_code.as_str(),
                    card.collector_number.as_str(),
                    card.type_line.as_str(),
                    card.oracle_text.as_str(),
                    card.mana_cost.as_deref(),
                ],
            )?;
            written += 1;
        }

        tx.commit()?;
        Ok(written)
    }

    fn get_card(
        &self,
        set_code: &str,
        collector_number: &str,
    ) -> RepoResult<Option<CatalogCard>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CARD_SELECT_SQL}
             WHERE set_code = ?1
               AND collector_number = ?2;"
        ))?;

        let mut rows = stmt.query(params![set_code, collector_number])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_card_row(row)?));
        }

        Ok(None)
    }

    fn catalog_size(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM cards;", [], |row| row.get(0))?;
        Ok(count.unsigned_abs())
    }
}

pub(crate) fn parse_card_row(row: &Row<'_>) -> RepoResult<CatalogCard> {
    let card = CatalogCard {
        name: row.get("name")?,
        set_code: row.get("set_code")?,
        collector_number: row.get("collector_number")?,
        type_line: row.get("type_line")?,
        oracle_text: row.get("oracle_text")?,
        mana_cost: row.get("mana_cost")?,
    };
    card.validate()?;
    Ok(card)
}
