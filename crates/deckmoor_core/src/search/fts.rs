//! SQLite FTS5-based card search implementation.
//!
//! # Responsibility
//! - Provide keyword search over card name, type line and rules text.
//! - Return one page of typed hits plus continuation metadata.
//!
//! # Invariants
//! - `page` is 1-based; page 0 is rejected.
//! - `has_more` reflects whether another page exists, probed one row
//!   past the requested page.
//! - Result ordering is deterministic by rank, card name, then rowid.

use crate::db::DbError;
use crate::model::card::CatalogCard;
use crate::repo::card_repo::parse_card_row;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for search APIs.
pub type SearchResult<T> = Result<T, SearchError>;

/// Search-layer error for query parsing, DB interaction and result decoding.
#[derive(Debug)]
pub enum SearchError {
    /// User-provided query cannot be parsed by FTS5 syntax.
    InvalidQuery { query: String, message: String },
    /// Requested page is outside the 1-based page range.
    PageOutOfRange { page: u32 },
    Db(DbError),
    InvalidData(String),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidQuery { query, message } => {
                write!(f, "invalid full-text query `{query}`: {message}")
            }
            Self::PageOutOfRange { page } => {
                write!(f, "page must be at least 1, got {page}")
            }
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid search row: {message}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for SearchError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SearchError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Search options for paginated card queries.
#[derive(Debug, Clone)]
pub struct CardSearchQuery {
    /// User query text.
    pub text: String,
    /// 1-based page to return.
    pub page: u32,
    /// Number of hits per page.
    pub page_size: u32,
    /// Whether to pass text directly as a raw FTS5 expression.
    ///
    /// Default is `false` so arbitrary user text never trips FTS5
    /// syntax errors.
    pub raw_fts_syntax: bool,
}

impl CardSearchQuery {
    /// Creates a query for the first page with default page size.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            page: 1,
            page_size: 20,
            raw_fts_syntax: false,
        }
    }
}

/// Single search hit returned by [`search_cards`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardHit {
    pub card: CatalogCard,
    /// Rules-text excerpt with match markers.
    pub snippet: String,
}

/// One page of card search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSearchPage {
    pub cards: Vec<CardHit>,
    /// Page that was returned, 1-based.
    pub page: u32,
    /// Whether at least one more page of hits exists.
    pub has_more: bool,
    /// Next page to request, populated only when `has_more`.
    pub next_page: Option<u32>,
}

impl CardSearchPage {
    fn empty(page: u32) -> Self {
        Self {
            cards: Vec::new(),
            page,
            has_more: false,
            next_page: None,
        }
    }
}

/// Searches the card catalog via FTS5 and returns one ranked page.
///
/// Returns an empty page for blank queries and for `page_size == 0`.
pub fn search_cards(conn: &Connection, query: &CardSearchQuery) -> SearchResult<CardSearchPage> {
    if query.page == 0 {
        return Err(SearchError::PageOutOfRange { page: query.page });
    }

    let Some(match_expr) = build_match_expression(query) else {
        return Ok(CardSearchPage::empty(query.page));
    };

    if query.page_size == 0 {
        return Ok(CardSearchPage::empty(query.page));
    }

    let offset = i64::from(query.page - 1).saturating_mul(i64::from(query.page_size));
    // One extra row answers has_more without a second query.
    let probe_limit = i64::from(query.page_size) + 1;

    let sql = "SELECT
            cards.name AS name,
            cards.set_code AS set_code,
            cards.collector_number AS collector_number,
            cards.type_line AS type_line,
            cards.oracle_text AS oracle_text,
            cards.mana_cost AS mana_cost,
            snippet(cards_fts, 2, '[', ']', ' ... ', 12) AS snippet
         FROM cards_fts
         JOIN cards ON cards.id = cards_fts.rowid
         WHERE cards_fts MATCH ?
         ORDER BY bm25(cards_fts), cards.name ASC, cards.id ASC
         LIMIT ? OFFSET ?";
    let bind_values = vec![
        Value::Text(match_expr.clone()),
        Value::Integer(probe_limit),
        Value::Integer(offset),
    ];

    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt
        .query(params_from_iter(bind_values))
        .map_err(|err| map_query_error(err, &match_expr))?;
    let mut hits = Vec::new();

    while let Some(row) = rows
        .next()
        .map_err(|err| map_query_error(err, &match_expr))?
    {
        hits.push(parse_hit_row(row)?);
    }

    let has_more = hits.len() as u64 > u64::from(query.page_size);
    hits.truncate(query.page_size as usize);

    Ok(CardSearchPage {
        cards: hits,
        page: query.page,
        has_more,
        next_page: has_more.then(|| query.page + 1),
    })
}

fn parse_hit_row(row: &Row<'_>) -> SearchResult<CardHit> {
    let card = parse_card_row(row).map_err(|err| SearchError::InvalidData(err.to_string()))?;
    Ok(CardHit {
        card,
        snippet: row.get("snippet")?,
    })
}

fn build_match_expression(query: &CardSearchQuery) -> Option<String> {
    let text = query.text.trim();
    if text.is_empty() {
        return None;
    }

    if query.raw_fts_syntax {
        return Some(text.to_string());
    }

    let terms = text
        .split_whitespace()
        .map(escape_fts_term)
        .collect::<Vec<_>>();

    if terms.is_empty() {
        return None;
    }

    Some(terms.join(" AND "))
}

fn escape_fts_term(raw: &str) -> String {
    let escaped = raw.replace('"', "\"\"");
    format!("\"{escaped}\"")
}

fn map_query_error(err: rusqlite::Error, query: &str) -> SearchError {
    if is_match_syntax_error(&err) {
        return SearchError::InvalidQuery {
            query: query.to_string(),
            message: err.to_string(),
        };
    }

    SearchError::Db(DbError::Sqlite(err))
}

fn is_match_syntax_error(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(_, Some(message)) => {
            let msg = message.to_lowercase();
            (msg.contains("fts5") && msg.contains("syntax"))
                || msg.contains("malformed match expression")
                || msg.contains("unterminated")
        }
        _ => false,
    }
}
