//! Card catalog use-case service.
//!
//! # Responsibility
//! - Provide the catalog import entry point used to seed card search.
//! - Expose printing-level lookups to callers.
//!
//! # Invariants
//! - Imports are delegated to the repository transaction wholesale.
//! - Every import emits one `catalog_import` log event.

use crate::model::card::CatalogCard;
use crate::repo::card_repo::CardRepository;
use crate::repo::deck_repo::RepoResult;
use log::{error, info};
use std::time::Instant;

/// Use-case service wrapper for the card catalog.
pub struct CatalogService<R: CardRepository> {
    repo: R,
}

impl<R: CardRepository> CatalogService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Imports a batch of printings into the catalog.
    ///
    /// # Contract
    /// - Existing printings with the same `(set_code, collector_number)`
    ///   are replaced.
    /// - Either every card in the batch is written or none are.
    /// - Returns the number of rows written.
    pub fn import_set(&mut self, cards: &[CatalogCard]) -> RepoResult<u32> {
        let started_at = Instant::now();

        match self.repo.import_cards(cards) {
            Ok(written) => {
                info!(
                    "event=catalog_import module=catalog status=ok cards={written} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(written)
            }
            Err(err) => {
                error!(
                    "event=catalog_import module=catalog status=error cards={} duration_ms={} error={err}",
                    cards.len(),
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }

    /// Reads one printing by catalog identity.
    pub fn card_by_printing(
        &self,
        set_code: &str,
        collector_number: &str,
    ) -> RepoResult<Option<CatalogCard>> {
        self.repo.get_card(set_code, collector_number)
    }

    /// Number of printings currently in the catalog.
    pub fn catalog_size(&self) -> RepoResult<u64> {
        self.repo.catalog_size()
    }
}
