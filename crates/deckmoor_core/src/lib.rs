//! Core domain logic for Deckmoor.
//! This crate is the single source of truth for deck persistence invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::card::{CardValidationError, CatalogCard};
pub use model::deck::{Deck, DeckEntry, DeckFormat, DeckId, DeckValidationError};
pub use model::mana::{mana_value, parse_mana_cost, ManaCostError, ManaSymbol};
pub use repo::card_repo::{CardRepository, SqliteCardRepository};
pub use repo::deck_repo::{
    DeckListQuery, DeckRepository, RepoError, RepoResult, SqliteDeckRepository,
};
pub use search::fts::{
    search_cards, CardHit, CardSearchPage, CardSearchQuery, SearchError, SearchResult,
};
pub use service::catalog_service::CatalogService;
pub use service::deck_service::DeckService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
