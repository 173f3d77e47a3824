//! Deck use-case service.
//!
//! # Responsibility
//! - Provide stable save/load/delete entry points for deck callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::deck::{Deck, DeckId};
use crate::repo::deck_repo::{DeckListQuery, DeckRepository, RepoResult};

/// Use-case service wrapper for deck persistence.
pub struct DeckService<R: DeckRepository> {
    repo: R,
}

impl<R: DeckRepository> DeckService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Saves one deck document under its stable id.
    ///
    /// # Contract
    /// - Upsert semantics: an existing document with the same id is
    ///   replaced wholesale.
    /// - Returns the stable deck id.
    pub fn save_deck(&self, deck: &Deck) -> RepoResult<DeckId> {
        self.repo.save_deck(deck)
    }

    /// Loads every active deck in the store.
    ///
    /// # Contract
    /// - Tombstoned decks are omitted.
    /// - Ordering is `updated_at DESC, uuid ASC`.
    pub fn load_decks(&self) -> RepoResult<Vec<Deck>> {
        self.repo.list_decks(&DeckListQuery::default())
    }

    /// Deletes one deck by stable id.
    ///
    /// # Contract
    /// - The deck disappears from subsequent loads.
    /// - Deleting an already-deleted deck succeeds.
    /// - Returns `NotFound` only for ids the store has never seen.
    pub fn delete_deck(&self, id: DeckId) -> RepoResult<()> {
        self.repo.soft_delete_deck(id)
    }

    /// Gets one deck by id with optional tombstone visibility.
    pub fn get_deck(&self, id: DeckId, include_deleted: bool) -> RepoResult<Option<Deck>> {
        self.repo.get_deck(id, include_deleted)
    }

    /// Lists decks using filter and pagination options.
    pub fn list_decks(&self, query: &DeckListQuery) -> RepoResult<Vec<Deck>> {
        self.repo.list_decks(query)
    }
}
